use crate::error::{CaptionCliError, Result};
use panoptic_caption_common::{ServiceConfig, BACKEND_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CaptionCliError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("panoptic-caption").join("config.json"))
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        self.service.set_base_url(url)?;
        self.save()
    }

    /// 実際に使う接続設定（優先順: コマンドライン > 環境変数 > 設定ファイル）
    pub fn resolve_service(&self, base_url_flag: Option<&str>) -> Result<ServiceConfig> {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        self.resolve_with(base_url_flag, env_url.as_deref())
    }

    pub fn resolve_with(&self, base_url_flag: Option<&str>, env_url: Option<&str>) -> Result<ServiceConfig> {
        let mut service = self.service.clone();
        let override_url = base_url_flag
            .or(env_url)
            .map(str::trim)
            .filter(|url| !url.is_empty());

        if let Some(url) = override_url {
            service.set_base_url(url)?;
        }
        Ok(service)
    }
}
