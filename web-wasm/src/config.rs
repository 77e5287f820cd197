//! ビルド時に埋め込む接続設定
//!
//! 未設定なら空文字。検証はせず、リクエスト時の失敗として表面化させる。

pub fn api_url() -> &'static str {
    option_env!("BOX_SCANNER_API_URL").unwrap_or_default()
}

pub fn api_token() -> &'static str {
    option_env!("BOX_SCANNER_API_TOKEN").unwrap_or_default()
}
