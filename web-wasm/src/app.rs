//! メインアプリケーションコンポーネント

use box_scanner_common::{
    AnalysisData, AnalysisError, AnalysisWorkflow, HealthMonitor, RequestId, Submission,
};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::components::{
    header::Header,
    image_preview::ImagePreview,
    results_display::ResultsDisplay,
    upload_area::UploadArea,
};
use crate::theme::Theme;
use crate::{api, console};

/// 送信用の `File` とData URLプレビューを持つワークフロー
///
/// `File` は Send ではないのでローカルストレージのシグナルに置く
pub type WorkflowSignal = RwSignal<AnalysisWorkflow<File, String>, LocalStorage>;

/// 起動時に一度だけヘルスチェックする
fn probe_health(health: RwSignal<HealthMonitor>) {
    spawn_local(async move {
        match api::fetch_health().await {
            Ok((status, body)) => {
                health.update(|m| {
                    m.record_response(status, body.as_bytes());
                });
            }
            Err(e) => {
                console::warn(&format!("health probe failed: {}", e));
                health.update(|m| {
                    m.record_failure();
                });
            }
        }
        console::info(&format!("analyzer {}", health.with_untracked(|m| m.state())));
    });
}

/// 送信を開始して送信内容を取り出す。送信中の二重送信はワークフロー側で弾かれる
fn begin_submission(workflow: WorkflowSignal) -> Option<Submission<File>> {
    match workflow.try_update(|w| w.submit())? {
        Ok(submission) => Some(submission),
        Err(AnalysisError::SubmissionInFlight) => None,
        Err(err) => {
            console::warn(&err.to_string());
            None
        }
    }
}

/// レスポンスを反映する。リセットや再選択の後に届いたものは捨てる
fn finish_submission(
    workflow: WorkflowSignal,
    id: RequestId,
    outcome: Result<AnalysisData, AnalysisError>,
) -> bool {
    if let Err(err) = &outcome {
        console::warn(&err.to_string());
    }

    let applied = workflow.try_update(|w| w.resolve(id, outcome)).unwrap_or(false);
    if !applied {
        console::info(&format!("stale response #{} ignored", id.value()));
    }
    applied
}

/// 選択中の画像を送信する
pub fn start_analysis(workflow: WorkflowSignal) {
    let Some(submission) = begin_submission(workflow) else {
        return;
    };

    spawn_local(async move {
        let outcome = api::analyze(&submission.image).await;
        finish_submission(workflow, submission.id, outcome);
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let theme = RwSignal::new(Theme::default());
    let health = RwSignal::new(HealthMonitor::new());
    let workflow: WorkflowSignal = RwSignal::new_local(AnalysisWorkflow::new());

    probe_health(health);

    let has_preview = move || workflow.with(|w| w.preview().is_some());
    let results = move || workflow.with(|w| w.result().cloned());
    let error = move || workflow.with(|w| w.error().map(|e| e.to_string()));

    view! {
        <div class=move || format!("app {}", theme.get().css_class())>
            <div class="container">
                <Header theme=theme health=health />

                <div class="card">
                    <div class="card-header">
                        <h2>"Automatic Box Identification"</h2>
                        <p class="text-muted">"Upload an image to identify and count the boxes"</p>
                    </div>

                    <Show
                        when=has_preview
                        fallback=move || view! { <UploadArea workflow=workflow /> }
                    >
                        <ImagePreview workflow=workflow />
                    </Show>

                    {move || error().map(|message| view! {
                        <div class="error-banner">{message}</div>
                    })}

                    {move || results().map(|results| view! {
                        <ResultsDisplay results=results />
                    })}
                </div>

                <footer class="footer">
                    <p class="text-muted">"Automatic box identification prototype"</p>
                </footer>
            </div>
        </div>
    }
}
