//! 解析ワークフローの状態機械
//!
//! 画像選択 → プレビュー → 送信 → 結果/エラー のライフサイクルを管理する。
//! I/Oは持たず、呼び出し側（CLI / WASM）がデコードと通信を行い、
//! 完了をチケットやリクエストIDつきで報告する。
//!
//! ```text
//! idle -> (select) -> previewing
//! previewing -> (select) -> previewing
//! previewing -> (submit) -> submitting
//! submitting -> (resolve ok) -> succeeded
//! submitting -> (resolve err) -> failed
//! succeeded|failed -> (select) -> previewing
//! * -> (reset) -> idle
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::AnalysisData;

/// ワークフローの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    Idle,
    Previewing,
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Previewing => "previewing",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Succeeded => "succeeded",
            WorkflowState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送信ごとに単調増加するID。最新のものだけが結果を反映できる
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// プレビューデコードの受付番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecodeTicket(u64);

/// 送信すべき内容
#[derive(Debug, Clone)]
pub struct Submission<I> {
    pub id: RequestId,
    pub image: I,
}

/// 解析ワークフロー
///
/// * `I` - 送信用の生画像（WASMでは `web_sys::File`、CLIではバイト列）
/// * `P` - 表示用のプレビュー
#[derive(Debug, Clone)]
pub struct AnalysisWorkflow<I, P> {
    image: Option<I>,
    preview: Option<P>,
    result: Option<AnalysisData>,
    error: Option<AnalysisError>,
    decoding: Option<(DecodeTicket, I)>,
    in_flight: Option<RequestId>,
    next_ticket: u64,
    next_request: u64,
}

impl<I, P> Default for AnalysisWorkflow<I, P> {
    fn default() -> Self {
        Self {
            image: None,
            preview: None,
            result: None,
            error: None,
            decoding: None,
            in_flight: None,
            next_ticket: 0,
            next_request: 0,
        }
    }
}

impl<I, P> AnalysisWorkflow<I, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WorkflowState {
        if self.in_flight.is_some() {
            WorkflowState::Submitting
        } else if self.result.is_some() {
            WorkflowState::Succeeded
        } else if self.error.is_some() {
            WorkflowState::Failed
        } else if self.preview.is_some() {
            WorkflowState::Previewing
        } else {
            WorkflowState::Idle
        }
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&P> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisData> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// プレビューのデコード待ちか
    pub fn is_decoding(&self) -> bool {
        self.decoding.is_some()
    }

    /// 画像を選択する
    ///
    /// 生画像を保持してデコード待ちになる。状態が変わるのは
    /// `complete_preview` / `fail_preview` が呼ばれたとき。
    /// 以前のデコード待ちは破棄される。
    pub fn select_image(&mut self, image: I) -> DecodeTicket {
        self.next_ticket += 1;
        let ticket = DecodeTicket(self.next_ticket);
        self.decoding = Some((ticket, image));
        ticket
    }

    /// デコード完了。最新のチケットのときだけ選択を差し替えて `previewing` にする
    pub fn complete_preview(&mut self, ticket: DecodeTicket, preview: P) -> bool {
        let Some(image) = self.take_decoding(ticket) else {
            return false;
        };

        self.image = Some(image);
        self.preview = Some(preview);
        self.result = None;
        self.error = None;
        self.in_flight = None;
        true
    }

    /// デコード失敗。選択を破棄して `DecodeFailed` で `failed` にする
    pub fn fail_preview(&mut self, ticket: DecodeTicket, reason: impl Into<String>) -> bool {
        if self.take_decoding(ticket).is_none() {
            return false;
        }

        self.image = None;
        self.preview = None;
        self.result = None;
        self.error = Some(AnalysisError::DecodeFailed(reason.into()));
        self.in_flight = None;
        true
    }

    fn take_decoding(&mut self, ticket: DecodeTicket) -> Option<I> {
        match self.decoding.take() {
            Some((current, image)) if current == ticket => Some(image),
            other => {
                self.decoding = other;
                None
            }
        }
    }

    /// レスポンスを反映する
    ///
    /// `id` が最新の送信と一致しない場合（リセット後、再選択後など）は無視して `false`。
    pub fn resolve(
        &mut self,
        id: RequestId,
        outcome: Result<AnalysisData, AnalysisError>,
    ) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }

        self.in_flight = None;
        match outcome {
            Ok(data) => {
                self.result = Some(data);
                self.error = None;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err);
            }
        }
        true
    }

    /// すべてを破棄して `idle` に戻す。送信中のリクエストは中断せず、結果を無視するだけ
    pub fn reset(&mut self) {
        self.image = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.decoding = None;
        self.in_flight = None;
    }
}

impl<I: Clone, P> AnalysisWorkflow<I, P> {
    /// 送信を開始する
    ///
    /// * 送信中 → `SubmissionInFlight`（状態は変えない）
    /// * 画像なし → `NoImageSelected` で `failed`
    /// * それ以外 → `submitting` にして送信内容を返す
    pub fn submit(&mut self) -> Result<Submission<I>, AnalysisError> {
        if self.in_flight.is_some() {
            return Err(AnalysisError::SubmissionInFlight);
        }

        let Some(image) = self.image.clone() else {
            self.result = None;
            self.error = Some(AnalysisError::NoImageSelected);
            return Err(AnalysisError::NoImageSelected);
        };

        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.in_flight = Some(id);
        self.result = None;
        self.error = None;

        Ok(Submission { id, image })
    }
}
