//! エラー型定義
//!
//! キャプション要求の失敗分類（通信・サービス・不正レスポンス）と、
//! ネイティブ側で起きる設定/IOエラーをひとつの型にまとめる。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 通信自体が完了しなかった（オフライン、DNS、接続拒否など）
    #[error("{0}")]
    Transport(String),

    /// クライアント側タイムアウト
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// 非2xxステータス。`message` はボディの `error`/`detail`、なければ `HTTP <code>`
    #[error("{message}")]
    Service { status: u16, message: String },

    /// 2xxだがボディが期待する構造ではない
    #[error("invalid response: {0}")]
    MalformedResponse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// `Failed` 状態に載せる表示用メッセージ
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            // 空のままだとエラー表示が消えてしまう
            match self {
                Error::Service { status, .. } => format!("HTTP {}", status),
                _ => "request failed".to_string(),
            }
        } else {
            message
        }
    }

    /// HTTPステータス（サービスエラーのみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_service_is_bare_message() {
        let error = Error::Service {
            status: 500,
            message: "model unavailable".to_string(),
        };
        assert_eq!(format!("{}", error), "model unavailable");
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_error_display_timeout_is_distinguishable() {
        let error = Error::Timeout(30);
        assert_eq!(error.user_message(), "request timed out after 30s");
    }

    #[test]
    fn test_error_display_malformed() {
        let error = Error::MalformedResponse("expected a JSON object".to_string());
        assert_eq!(error.user_message(), "invalid response: expected a JSON object");
    }

    #[test]
    fn test_user_message_never_empty() {
        let error = Error::Service {
            status: 502,
            message: "   ".to_string(),
        };
        assert_eq!(error.user_message(), "HTTP 502");

        let error = Error::Transport(String::new());
        assert_eq!(error.user_message(), "request failed");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
