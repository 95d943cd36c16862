//! キャプションサービスのHTTP契約
//!
//! トランスポート（fetch / reqwest）に依存しない部分だけを置く。
//! 各スキンは `(status, body)` を受け取ったら [`interpret_response`] に渡す。

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::ComparisonResult;

pub const CAPTION_PATH: &str = "/api/caption";
pub const HEALTH_PATH: &str = "/api/health";

/// multipartフィールド名
pub const FIELD_FILE: &str = "file";
pub const FIELD_TOPK: &str = "topk";

/// `GET /api/health` のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// `topk` フィールドの値（10進文字列）
pub fn topk_field_value(top_k: i64) -> String {
    top_k.to_string()
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// ステータスとボディから結果を得る
pub fn interpret_response(status: u16, body: &str) -> Result<ComparisonResult> {
    if is_success(status) {
        parse_success_body(body)
    } else {
        Err(Error::Service {
            status,
            message: error_message(status, body),
        })
    }
}

/// 成功レスポンスのボディを解釈する
///
/// JSONオブジェクト以外、または型の合わないフィールドは不正レスポンス。
pub fn parse_success_body(body: &str) -> Result<ComparisonResult> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(Error::MalformedResponse("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
}

/// エラーレスポンスの表示メッセージ
///
/// `error` → `detail` → `HTTP <code>` の順に採用する。
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "detail"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP {}", status))
}
