//! reqwestによるキャプションサービス呼び出し

use panoptic_caption_common::service::{
    error_message, is_success, topk_field_value, FIELD_FILE, FIELD_TOPK,
};
use panoptic_caption_common::{
    interpret_response, ComparisonResult, Error, HealthStatus, ImageFile, ServiceConfig,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct CaptionClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl CaptionClient {
    /// 接続先とタイムアウトは `config` から取る。`timeout_seconds == 0` ならタイムアウトなし。
    pub fn new(config: ServiceConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `POST /api/caption`（multipart: file, topk）
    pub async fn caption(&self, image: &ImageFile, top_k: i64) -> Result<ComparisonResult, Error> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| self.transport_error(e))?;
        let form = Form::new()
            .part(FIELD_FILE, part)
            .text(FIELD_TOPK, topk_field_value(top_k));

        let url = self.config.caption_url();
        log::debug!("POST {} (topk={})", url, top_k);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            // ステータスが分かっていればそちらを優先する
            Err(_) if !is_success(status) => String::new(),
            Err(e) => return Err(self.transport_error(e)),
        };
        log::debug!("response {} ({} bytes)", status, body.len());

        interpret_response(status, &body)
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        let response = self
            .client
            .get(self.config.health_url())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        if !is_success(status) {
            return Err(Error::Service {
                status,
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.config.timeout_seconds)
        } else {
            Error::Transport(e.to_string())
        }
    }
}
