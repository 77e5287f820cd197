//! 解析サービスへのHTTPクライアント
//!
//! リクエストを一回投げてステータスとボディを返すだけ。
//! リトライもクライアント側タイムアウトも持たない。

use box_scanner_common::protocol::{
    bearer_value, endpoint_url, interpret_analysis_response, ANALYZE_PATH, HEALTH_PATH,
    UPLOAD_FIELD,
};
use box_scanner_common::{AnalysisData, AnalysisError};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::image_file::ImageFile;

/// 生のHTTPレスポンス
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl AnalyzerClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn fetch_health(&self) -> Result<RawResponse, reqwest::Error> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH);
        debug!(%url, "health probe");

        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }

    /// `POST /analyze`（multipart、Bearer認証）
    pub async fn post_image(&self, image: &ImageFile) -> Result<RawResponse, reqwest::Error> {
        let url = endpoint_url(&self.base_url, ANALYZE_PATH);
        debug!(%url, file = %image.file_name, bytes = image.bytes.len(), "analysis request");

        let part = Part::stream_with_length(image.bytes.clone(), image.bytes.len() as u64)
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer_value(&self.token))
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "analysis response");
        Ok(RawResponse { status, body })
    }

    /// 画像を送信して結果を解釈する
    pub async fn analyze(&self, image: &ImageFile) -> Result<AnalysisData, AnalysisError> {
        let response = self
            .post_image(image)
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        interpret_analysis_response(response.status, &response.body)
    }
}
