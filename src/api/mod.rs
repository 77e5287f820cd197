mod client;

pub use client::{AnalyzerClient, RawResponse};
