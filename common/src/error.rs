//! エラー型定義

use thiserror::Error;

/// 解析ワークフローのエラー
///
/// いずれも現在の送信サイクルを終わらせるだけで、
/// `reset()` か新しい画像の選択で回復できる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No image selected")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    SubmissionInFlight,

    #[error("Could not read the image: {0}")]
    DecodeFailed(String),

    /// `success:false` のレスポンス
    #[error("{0}")]
    ServiceRejected(String),

    /// 非2xxレスポンス。ボディに `message` があればそれを優先する
    #[error("Analysis failed: {}", http_detail(.status, .message))]
    Http { status: u16, message: Option<String> },

    /// 接続エラー、JSONでないレスポンスなど
    #[error("Analysis failed: {0}")]
    Transport(String),
}

/// `success:false` でメッセージが無いときの文言
pub const GENERIC_REJECTION: &str = "The analyzer could not process the image";

fn http_detail(status: &u16, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => format!("HTTP error: {}", status),
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_prefers_body_message() {
        let error = AnalysisError::Http {
            status: 500,
            message: Some("model unavailable".to_string()),
        };
        assert_eq!(error.to_string(), "Analysis failed: model unavailable");
    }

    #[test]
    fn test_http_error_falls_back_to_status() {
        let error = AnalysisError::Http { status: 502, message: None };
        assert_eq!(error.to_string(), "Analysis failed: HTTP error: 502");

        let error = AnalysisError::Http { status: 401, message: Some(String::new()) };
        assert_eq!(error.to_string(), "Analysis failed: HTTP error: 401");
    }

    #[test]
    fn test_transport_error_display() {
        let error = AnalysisError::Transport("connection refused".to_string());
        assert_eq!(error.to_string(), "Analysis failed: connection refused");
    }

    #[test]
    fn test_service_rejected_is_verbatim() {
        let error = AnalysisError::ServiceRejected("no boxes found".to_string());
        assert_eq!(error.to_string(), "no boxes found");
    }
}
