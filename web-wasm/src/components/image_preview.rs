//! 画像プレビューと操作ボタン

use leptos::prelude::*;

use crate::app::{start_analysis, WorkflowSignal};

#[component]
pub fn ImagePreview(workflow: WorkflowSignal) -> impl IntoView {
    let preview = move || workflow.with(|w| w.preview().cloned()).unwrap_or_default();
    let is_submitting = move || workflow.with(|w| w.is_submitting());

    view! {
        <div class="preview">
            <div class="preview-frame">
                <img src=preview alt="Preview" />
                <Show when=is_submitting>
                    <div class="scan-overlay">
                        <div class="scan-line"></div>
                    </div>
                </Show>
            </div>

            <div class="preview-actions">
                <button
                    class="btn btn-primary"
                    disabled=is_submitting
                    on:click=move |_| start_analysis(workflow)
                >
                    {move || if is_submitting() { "Analyzing..." } else { "Analyze" }}
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| workflow.update(|w| w.reset())
                >
                    "New Image"
                </button>
            </div>
        </div>
    }
}
