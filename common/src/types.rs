//! 解析サービスとの契約型
//!
//! CLIとWeb(WASM)で共有される型:
//! - HealthStatus: `GET /health` のレスポンス
//! - AnalysisResponse: `POST /analyze` のレスポンス
//! - AnalysisData: 解析結果（確定カウント・目視カウント・サマリー）

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// ヘルスチェックのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub success: bool,

    pub status: String,

    #[serde(alias = "analyzerReady")]
    pub analyzer_ready: bool,
}

impl HealthStatus {
    /// 3条件すべてを満たす場合のみ利用可能
    pub fn is_ready(&self) -> bool {
        self.success && self.status == "healthy" && self.analyzer_ready
    }
}

/// 箱種別ごとのカウント
///
/// `total` は必須。それ以外のキー（`boxes_618` など）は開いたマップとして
/// 値の型を問わずそのまま保持する。カウントとして扱うのは非負整数の値だけ。
/// `total` と各値の合計はサーバー側の計算で、ここでは検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxCounts {
    pub total: u64,

    #[serde(flatten)]
    pub by_type: BTreeMap<String, Value>,
}

impl BoxCounts {
    pub fn get(&self, key: &str) -> Option<u64> {
        if key == "total" {
            return Some(self.total);
        }
        self.by_type.get(key).and_then(Value::as_u64)
    }

    /// `total` 以外の整数エントリ（キー順）
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> {
        self.by_type
            .iter()
            .filter_map(|(k, v)| v.as_u64().map(|count| (k.as_str(), count)))
    }
}

/// 集計サマリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_boxes_detected: u64,
    pub total_processed: u64,
    pub boxes_618_total: u64,
    pub boxes_623_total: u64,

    /// 未知のサマリーキー（型は問わない）
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// 解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub confirmed_count: BoxCounts,
    pub visual_count: BoxCounts,
    pub summary: AnalysisSummary,
}

/// `POST /analyze` のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<AnalysisData>,

    #[serde(default)]
    pub message: Option<String>,
}

/// 非2xxレスポンスのエラーボディ（形が崩れていても読めるところだけ読む）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "confirmed_count": {"boxes_618": 2, "boxes_623": 4, "total": 6},
        "visual_count": {"boxes_618": 2, "boxes_623": 5, "total": 7},
        "summary": {
            "total_boxes_detected": 7,
            "total_processed": 7,
            "boxes_618_total": 2,
            "boxes_623_total": 5
        }
    }"#;

    #[test]
    fn test_deserialize_analysis_data() {
        let data: AnalysisData = serde_json::from_str(SAMPLE).expect("デシリアライズ失敗");
        assert_eq!(data.confirmed_count.total, 6);
        assert_eq!(data.visual_count.total, 7);
        assert_eq!(data.confirmed_count.get("boxes_623"), Some(4));
        assert_eq!(data.visual_count.get("boxes_623"), Some(5));
        assert_eq!(data.summary.total_boxes_detected, 7);
        assert!(data.summary.extra.is_empty());
    }

    #[test]
    fn test_unknown_box_types_are_kept() {
        let json = r#"{"boxes_618": 1, "boxes_700": 3, "total": 4}"#;
        let counts: BoxCounts = serde_json::from_str(json).unwrap();
        assert_eq!(counts.get("boxes_700"), Some(3));
        assert_eq!(counts.get("total"), Some(4));

        let keys: Vec<&str> = counts.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["boxes_618", "boxes_700"]);
    }

    #[test]
    fn test_counts_without_total_rejected() {
        let json = r#"{"boxes_618": 1}"#;
        assert!(serde_json::from_str::<BoxCounts>(json).is_err());
    }

    #[test]
    fn test_serialize_keeps_total_and_entries_flat() {
        let counts: BoxCounts =
            serde_json::from_str(r#"{"boxes_618": 2, "total": 2}"#).unwrap();
        let value = serde_json::to_value(&counts).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["boxes_618"], 2);
    }

    #[test]
    fn test_summary_extra_keys() {
        let json = r#"{
            "total_boxes_detected": 3,
            "total_processed": 3,
            "boxes_618_total": 1,
            "boxes_623_total": 2,
            "boxes_700_total": 0
        }"#;
        let summary: AnalysisSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.extra.get("boxes_700_total"), Some(&Value::from(0)));
    }

    #[test]
    fn test_non_integer_extras_are_kept_but_not_counted() {
        let json = r#"{"boxes_618": 2, "confidence": 0.93, "model": "v2", "total": 2}"#;
        let counts: BoxCounts = serde_json::from_str(json).unwrap();
        assert_eq!(counts.get("boxes_618"), Some(2));
        assert_eq!(counts.get("confidence"), None);
        assert_eq!(counts.by_type.get("model"), Some(&Value::from("v2")));

        let keys: Vec<&str> = counts.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["boxes_618"]);
    }

    #[test]
    fn test_health_status_camel_case_alias() {
        let json = r#"{"success": true, "status": "healthy", "analyzerReady": true}"#;
        let status: HealthStatus = serde_json::from_str(json).unwrap();
        assert!(status.is_ready());
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus {
            success: true,
            status: "degraded".to_string(),
            analyzer_ready: true,
        };
        assert!(!status.is_ready());
    }

    #[test]
    fn test_analysis_response_without_data() {
        let json = r#"{"success": false, "message": "imagem inválida"}"#;
        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("imagem inválida"));
    }
}
