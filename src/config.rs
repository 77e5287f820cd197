use crate::error::{BoxScannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "BOX_SCANNER_API_URL";
pub const API_TOKEN_ENV: &str = "BOX_SCANNER_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BoxScannerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("box-scanner").join("config.json"))
    }

    /// 解析サービスのベースURL（環境変数を優先）
    ///
    /// 未設定でも空文字を返す。検証はせず、リクエスト時の失敗として表面化させる。
    pub fn api_url(&self) -> String {
        resolve(std::env::var(API_URL_ENV).ok(), self.api_url.as_deref())
    }

    /// Bearerトークン（環境変数を優先）
    pub fn api_token(&self) -> String {
        resolve(std::env::var(API_TOKEN_ENV).ok(), self.api_token.as_deref())
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        self.api_url = Some(url);
        self.save()
    }

    pub fn set_api_token(&mut self, token: String) -> Result<()> {
        self.api_token = Some(token);
        self.save()
    }
}

fn resolve(env_value: Option<String>, stored: Option<&str>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| stored.map(str::to_string))
        .unwrap_or_default()
}
