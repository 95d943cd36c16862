//! サービス接続設定
//!
//! 接続先はセッション中固定のひとつのオリジン。グローバル定数ではなく
//! 各トランスポートの生成時に渡す。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::DEFAULT_TOP_K;

/// 接続先を上書きする環境変数
pub const BACKEND_URL_ENV: &str = "PANOPTIC_BACKEND_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub default_top_k: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl ServiceConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self::default();
        config.set_base_url(base_url)?;
        Ok(config)
    }

    /// 末尾のスラッシュを落として保存する
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base URL must start with http:// or https://: {}",
                base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(())
    }

    /// `POST /api/caption` の完全なURL
    pub fn caption_url(&self) -> String {
        format!("{}{}", self.base_url, crate::service::CAPTION_PATH)
    }

    /// `GET /api/health` の完全なURL
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, crate::service::HEALTH_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.default_top_k, 8);
        assert_eq!(config.caption_url(), "http://localhost:8000/api/caption");
        assert_eq!(config.health_url(), "http://localhost:8000/api/health");
    }

    #[test]
    fn test_set_base_url_trims_trailing_slash() {
        let config = ServiceConfig::with_base_url("https://caption.example.com/ ").unwrap();
        assert_eq!(config.caption_url(), "https://caption.example.com/api/caption");
    }

    #[test]
    fn test_set_base_url_rejects_non_http() {
        let err = ServiceConfig::with_base_url("localhost:8000").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"base_url": "http://10.0.0.2:9000"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.default_top_k, DEFAULT_TOP_K);
    }
}
