//! サーバー状態の監視
//!
//! 起動時に一度だけ `GET /health` を投げ、その結果を保持する。
//! 表示専用で、解析の送信可否には影響しない。

use serde::{Deserialize, Serialize};

use crate::protocol::interpret_health_response;

/// サーバー状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Loading,
    Online,
    Offline,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Loading => "loading",
            HealthState::Online => "online",
            HealthState::Offline => "offline",
        }
    }

    /// バッジ表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Loading => "Checking…",
            HealthState::Online => "Server Online",
            HealthState::Offline => "Server Offline",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一回限りのヘルスチェック
///
/// 最初に記録された結果だけが有効で、以降の記録は無視される。
#[derive(Debug, Clone, Default)]
pub struct HealthMonitor {
    state: HealthState,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    /// まだプローブ結果を待っているか
    pub fn is_pending(&self) -> bool {
        self.state == HealthState::Loading
    }

    /// プローブのレスポンスを記録
    pub fn record_response(&mut self, status: u16, body: &[u8]) -> HealthState {
        if self.is_pending() {
            self.state = interpret_health_response(status, body);
        }
        self.state
    }

    /// 通信エラーを記録（常に Offline）
    pub fn record_failure(&mut self) -> HealthState {
        if self.is_pending() {
            self.state = HealthState::Offline;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTHY: &[u8] = br#"{"success": true, "status": "healthy", "analyzer_ready": true}"#;

    #[test]
    fn test_starts_loading() {
        let monitor = HealthMonitor::new();
        assert_eq!(monitor.state(), HealthState::Loading);
        assert!(monitor.is_pending());
    }

    #[test]
    fn test_healthy_response_is_online() {
        let mut monitor = HealthMonitor::new();
        assert_eq!(monitor.record_response(200, HEALTHY), HealthState::Online);
    }

    #[test]
    fn test_network_failure_is_offline() {
        let mut monitor = HealthMonitor::new();
        assert_eq!(monitor.record_failure(), HealthState::Offline);
    }

    #[test]
    fn test_result_is_cached() {
        let mut monitor = HealthMonitor::new();
        monitor.record_failure();

        // 二回目以降は無視
        assert_eq!(monitor.record_response(200, HEALTHY), HealthState::Offline);

        let mut monitor = HealthMonitor::new();
        monitor.record_response(200, HEALTHY);
        assert_eq!(monitor.record_failure(), HealthState::Online);
    }

    #[test]
    fn test_labels() {
        assert_eq!(HealthState::Online.label(), "Server Online");
        assert_eq!(HealthState::Offline.label(), "Server Offline");
        assert_eq!(HealthState::Loading.to_string(), "loading");
    }
}
