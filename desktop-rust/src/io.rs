use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panoptic_caption_common::service::{
    FIELD_FILE, FIELD_TOPK, error_message, is_success, topk_field_value,
};
use panoptic_caption_common::types::{IMAGE_EXTENSIONS, mime_type_for_extension};
use panoptic_caption_common::{
    BACKEND_URL_ENV, ComparisonResult, Error, ImageFile, ServiceConfig, interpret_response,
};
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Image", IMAGE_EXTENSIONS)
        .pick_file()
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| mime_type_for_extension(&ext.to_string_lossy()))
        .is_some()
}

pub fn load_image(path: &Path) -> Result<ImageFile> {
    let mime_type = path
        .extension()
        .and_then(|ext| mime_type_for_extension(&ext.to_string_lossy()))
        .ok_or_else(|| anyhow!("not an image file: {}", path.display()))?;
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ImageFile {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    service: ServiceConfig,
}

/// CLIと同じ設定ファイル（~/.config/panoptic-caption/config.json）を読む
pub fn load_service_config() -> ServiceConfig {
    let path = dirs::home_dir().map(|home| {
        home.join(".config")
            .join("panoptic-caption")
            .join("config.json")
    });
    let content = path.and_then(|p| fs::read_to_string(p).ok());
    let env_url = std::env::var(BACKEND_URL_ENV).ok();

    match service_config_from(content.as_deref(), env_url.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("config ignored: {err:#}");
            ServiceConfig::default()
        }
    }
}

pub fn service_config_from(content: Option<&str>, env_url: Option<&str>) -> Result<ServiceConfig> {
    let mut config = match content {
        Some(content) => {
            serde_json::from_str::<ConfigFile>(content)
                .context("parse config.json")?
                .service
        }
        None => ServiceConfig::default(),
    };

    if let Some(url) = env_url.map(str::trim).filter(|url| !url.is_empty()) {
        config.set_base_url(url)?;
    }
    Ok(config)
}

pub fn build_client(config: &ServiceConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
    }
    builder
        .build()
        .unwrap_or_else(|_| reqwest::blocking::Client::new())
}

/// `POST /api/caption`（ワーカースレッドから呼ぶ）
pub fn post_caption(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    image: &ImageFile,
    top_k: i64,
) -> std::result::Result<ComparisonResult, Error> {
    let transport_error = |e: reqwest::Error| {
        if e.is_timeout() {
            Error::Timeout(config.timeout_seconds)
        } else {
            Error::Transport(e.to_string())
        }
    };

    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime_type)
        .map_err(transport_error)?;
    let form = Form::new()
        .part(FIELD_FILE, part)
        .text(FIELD_TOPK, topk_field_value(top_k));

    let response = client
        .post(config.caption_url())
        .multipart(form)
        .send()
        .map_err(transport_error)?;

    let status = response.status().as_u16();
    match response.text() {
        Ok(body) => interpret_response(status, &body),
        Err(_) if !is_success(status) => Err(Error::Service {
            status,
            message: error_message(status, ""),
        }),
        Err(e) => Err(transport_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = service_config_from(None, None).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_service_config_from_file_and_env() {
        let content = r#"{"service": {"base_url": "http://gpu-box:8000", "default_top_k": 4}}"#;

        let config = service_config_from(Some(content), None).unwrap();
        assert_eq!(config.base_url, "http://gpu-box:8000");
        assert_eq!(config.default_top_k, 4);

        let config = service_config_from(Some(content), Some("http://other:9000/")).unwrap();
        assert_eq!(config.base_url, "http://other:9000");
        assert_eq!(config.default_top_k, 4);
    }

    #[test]
    fn test_service_config_broken_file() {
        assert!(service_config_from(Some("{"), None).is_err());
    }

    #[test]
    fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("street.webp");
        fs::write(&path, b"RIFF....WEBP").unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.file_name, "street.webp");
        assert_eq!(image.mime_type, "image/webp");
        assert!(is_image_path(&path));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(load_image(Path::new("notes.txt")).is_err());
    }
}
