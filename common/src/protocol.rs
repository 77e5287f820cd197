//! 解析サービスのHTTP契約
//!
//! トランスポート（reqwest / fetch）はステータスとボディだけを渡し、
//! 解釈はここで一元化する。

use crate::error::{AnalysisError, GENERIC_REJECTION};
use crate::health::HealthState;
use crate::types::{AnalysisData, AnalysisResponse, ErrorBody, HealthStatus};

pub const HEALTH_PATH: &str = "/health";
pub const ANALYZE_PATH: &str = "/analyze";

/// multipartで画像を載せるフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// ベースURLとパスを `/` の重複なしで連結
///
/// # Examples
/// ```
/// use box_scanner_common::protocol::{endpoint_url, HEALTH_PATH};
///
/// assert_eq!(endpoint_url("http://localhost:8000/", HEALTH_PATH), "http://localhost:8000/health");
/// ```
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `Authorization` ヘッダーの値
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// ヘルスチェックのレスポンスを判定
///
/// 2xxかつ `success && status == "healthy" && analyzer_ready` のときだけ Online。
/// パースできないボディも含めて、それ以外はすべて Offline。
pub fn interpret_health_response(status: u16, body: &[u8]) -> HealthState {
    if !is_success(status) {
        return HealthState::Offline;
    }

    match serde_json::from_slice::<HealthStatus>(body) {
        Ok(health) if health.is_ready() => HealthState::Online,
        _ => HealthState::Offline,
    }
}

/// 解析レスポンスを結果またはエラーに変換
///
/// * 非2xx → `Http`（ボディの `message` を優先）
/// * 2xx + `success:true` + `data` → 結果
/// * 2xx + `success:false` → `ServiceRejected`（メッセージが無ければ汎用文言）
/// * JSONとして読めない、または `data` 欠落 → `Transport`
pub fn interpret_analysis_response(
    status: u16,
    body: &[u8],
) -> Result<AnalysisData, AnalysisError> {
    if !is_success(status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(AnalysisError::Http { status, message });
    }

    let response: AnalysisResponse = serde_json::from_slice(body)
        .map_err(|e| AnalysisError::Transport(format!("invalid response: {}", e)))?;

    if !response.success {
        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        return Err(AnalysisError::ServiceRejected(message));
    }

    response
        .data
        .ok_or_else(|| AnalysisError::Transport("response carried no data".to_string()))
}
