use crate::error::{CaptionCliError, Result};
use panoptic_caption_common::types::mime_type_for_extension;
use panoptic_caption_common::ImageFile;
use std::path::Path;

/// 画像ファイルを読み込む
///
/// 拡張子で画像かどうかだけ判定する。中身の検証はサービス側に任せる。
pub fn load_image(path: &Path) -> Result<ImageFile> {
    if !path.is_file() {
        return Err(CaptionCliError::FileNotFound(path.display().to_string()));
    }

    let mime_type = path
        .extension()
        .and_then(|ext| mime_type_for_extension(&ext.to_string_lossy()))
        .ok_or_else(|| CaptionCliError::UnsupportedImage(path.display().to_string()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    let bytes = std::fs::read(path)?;
    log::debug!("loaded {} ({} bytes, {})", file_name, bytes.len(), mime_type);

    Ok(ImageFile {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}
