//! Box Scanner native client
//!
//! 解析サービスへの送信、設定、CLI表示

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_file;
pub mod report;
pub mod session;

pub use api::AnalyzerClient;
pub use session::AnalysisSession;
