//! アップロードエリアコンポーネント

use box_scanner_common::DecodeTicket;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::app::WorkflowSignal;

#[component]
pub fn UploadArea(workflow: WorkflowSignal) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        // 単一ファイルのみ
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            if let Some(ticket) = workflow.try_update(|w| w.select_image(file.clone())) {
                read_preview(file, ticket, workflow);
            }
        }

        // 同じファイルを選び直せるようにする
        input.set_value("");
    };

    view! {
        <div class="upload-area">
            <div class="upload-icon">"📷"</div>
            <p>"Select an image"</p>
            <p class="text-muted">"Choose a photo of the boxes to count"</p>
            <input
                type="file"
                id="image-upload"
                accept="image/*"
                class="hidden"
                on:change=on_change
            />
            <label for="image-upload" class="btn btn-primary">"Choose File"</label>
        </div>
    }
}

/// FileReaderでData URLを作り、完了をワークフローに通知する
pub(crate) fn read_preview(file: File, ticket: DecodeTicket, workflow: WorkflowSignal) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            workflow.update(|w| {
                w.fail_preview(ticket, "the browser cannot read files");
            });
            return;
        }
    };

    let reader_clone = reader.clone();
    let on_load = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        workflow.update(|w| match data_url {
            Some(data_url) => {
                w.complete_preview(ticket, data_url);
            }
            None => {
                w.fail_preview(ticket, "empty read result");
            }
        });
    }) as Box<dyn FnMut(_)>);

    let on_error = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        workflow.update(|w| {
            w.fail_preview(ticket, "the file could not be read");
        });
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_load.forget();
    on_error.forget();

    if reader.read_as_data_url(&file).is_err() {
        workflow.update(|w| {
            w.fail_preview(ticket, "the file could not be read");
        });
    }
}
