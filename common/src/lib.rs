//! Box Scanner Common Library
//!
//! CLIとWeb(WASM)で共有される契約型と状態機械

pub mod types;
pub mod error;
pub mod protocol;
pub mod health;
pub mod workflow;
pub mod display;

pub use types::{AnalysisData, AnalysisResponse, AnalysisSummary, BoxCounts, HealthStatus};
pub use error::{AnalysisError, Result};
pub use protocol::{interpret_analysis_response, interpret_health_response};
pub use health::{HealthMonitor, HealthState};
pub use workflow::{AnalysisWorkflow, DecodeTicket, RequestId, Submission, WorkflowState};
