use box_scanner_common::AnalysisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxScannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image file: {0} (use jpg, jpeg, png, webp, gif or bmp)")]
    UnsupportedImage(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoxScannerError>;
