//! 解析サービス連携（fetch API）
//!
//! ステータスとボディ文字列を取得し、解釈は共通ライブラリに任せる。

use box_scanner_common::protocol::{
    bearer_value, endpoint_url, interpret_analysis_response, ANALYZE_PATH, HEALTH_PATH,
    UPLOAD_FIELD,
};
use box_scanner_common::{AnalysisData, AnalysisError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

use crate::config;

/// JSエラーを文字列化
fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// リクエストを一回送り、ステータスとボディを返す
async fn send(request: &Request) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let text = JsFuture::from(resp.text()?).await?;
    Ok((status, text.as_string().unwrap_or_default()))
}

/// `GET /health`
pub async fn fetch_health() -> Result<(u16, String), String> {
    let url = endpoint_url(config::api_url(), HEALTH_PATH);

    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| js_error_message(&e))?;
    send(&request).await.map_err(|e| js_error_message(&e))
}

/// `POST /analyze`（FormDataの `file` フィールド、Bearer認証）
async fn post_image(file: &File) -> Result<(u16, String), JsValue> {
    let url = endpoint_url(config::api_url(), ANALYZE_PATH);

    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request
        .headers()
        .set("Authorization", &bearer_value(config::api_token()))?;

    send(&request).await
}

/// 画像を送信して結果を解釈する
pub async fn analyze(file: &File) -> Result<AnalysisData, AnalysisError> {
    let (status, body) = post_image(file)
        .await
        .map_err(|e| AnalysisError::Transport(js_error_message(&e)))?;
    interpret_analysis_response(status, body.as_bytes())
}
