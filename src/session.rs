//! 解析セッション
//!
//! ヘルスモニタと解析ワークフローをクライアントにつないで駆動する。
//! ヘルス状態は表示用で、送信は常に試みる。

use box_scanner_common::{
    AnalysisData, AnalysisError, AnalysisWorkflow, HealthMonitor, HealthState, WorkflowState,
};
use std::path::Path;
use tracing::{info, warn};

use crate::api::AnalyzerClient;
use crate::error::Result;
use crate::image_file::{self, ImageFile, ImagePreview};

pub struct AnalysisSession {
    client: AnalyzerClient,
    health: HealthMonitor,
    workflow: AnalysisWorkflow<ImageFile, ImagePreview>,
}

impl AnalysisSession {
    pub fn new(client: AnalyzerClient) -> Self {
        Self {
            client,
            health: HealthMonitor::new(),
            workflow: AnalysisWorkflow::new(),
        }
    }

    pub fn health(&self) -> HealthState {
        self.health.state()
    }

    pub fn state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn workflow(&self) -> &AnalysisWorkflow<ImageFile, ImagePreview> {
        &self.workflow
    }

    pub fn result(&self) -> Option<&AnalysisData> {
        self.workflow.result()
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.workflow.error()
    }

    /// 一回だけヘルスチェックする。二回目以降は保持している結果を返す
    pub async fn check_health(&mut self) -> HealthState {
        if !self.health.is_pending() {
            return self.health.state();
        }

        let state = match self.client.fetch_health().await {
            Ok(response) => self.health.record_response(response.status, &response.body),
            Err(e) => {
                warn!(error = %e, "health probe failed");
                self.health.record_failure()
            }
        };

        match state {
            HealthState::Online => info!(url = self.client.base_url(), "analyzer online"),
            _ => warn!(url = self.client.base_url(), "analyzer offline"),
        }
        state
    }

    /// 画像を選択してプレビューをデコードする
    ///
    /// ファイルが読めない場合はワークフローに触れずにエラーを返す。
    /// デコード失敗はワークフローの `failed` として記録される。
    pub async fn select_image(&mut self, path: &Path) -> Result<WorkflowState> {
        let image = image_file::load_image(path)?;
        let ticket = self.workflow.select_image(image.clone());

        let decoded = tokio::task::spawn_blocking(move || image_file::decode_preview(&image))
            .await
            .map_err(|e| AnalysisError::DecodeFailed(e.to_string()));

        match decoded.and_then(|r| r) {
            Ok(preview) => {
                info!(file = %path.display(), %preview, "image selected");
                self.workflow.complete_preview(ticket, preview);
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "image decode failed");
                let reason = match err {
                    AnalysisError::DecodeFailed(reason) => reason,
                    other => other.to_string(),
                };
                self.workflow.fail_preview(ticket, reason);
            }
        }

        Ok(self.workflow.state())
    }

    /// 選択中の画像を送信して結果を待つ
    pub async fn submit(&mut self) -> WorkflowState {
        let submission = match self.workflow.submit() {
            Ok(submission) => submission,
            Err(err) => {
                warn!(error = %err, "submission not sent");
                return self.workflow.state();
            }
        };

        info!(request = submission.id.value(), file = %submission.image.file_name, "submitting");
        let outcome = self.client.analyze(&submission.image).await;

        if let Err(err) = &outcome {
            warn!(request = submission.id.value(), error = %err, "analysis failed");
        }
        if !self.workflow.resolve(submission.id, outcome) {
            warn!(request = submission.id.value(), "stale analysis response ignored");
        }

        self.workflow.state()
    }

    pub fn reset(&mut self) {
        self.workflow.reset();
    }
}
