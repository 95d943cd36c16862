use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionCliError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}（対応形式: jpg, jpeg, png, gif, webp, bmp）")]
    UnsupportedImage(String),

    #[error("サービスが応答しません: {0}")]
    Unhealthy(String),

    #[error("キャプション生成に失敗: {0}")]
    CaptionFailed(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] panoptic_caption_common::Error),
}

pub type Result<T> = std::result::Result<T, CaptionCliError>;
