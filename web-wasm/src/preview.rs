//! Object URLによる画像プレビュー

use panoptic_caption_common::PreviewProvider;
use web_sys::{File, Url};

/// `URL.createObjectURL` で作ったURLを保持し、差し替え時に `revokeObjectURL` する
#[derive(Default)]
pub struct ObjectUrlPreview;

impl PreviewProvider for ObjectUrlPreview {
    type Image = File;
    /// URL生成に失敗した場合はNone（送信はできる）
    type Handle = Option<String>;

    fn create(&mut self, image: &File) -> Option<String> {
        match Url::create_object_url_with_blob(image) {
            Ok(url) => Some(url),
            Err(err) => {
                log::warn!(
                    "createObjectURL failed for {}: {}",
                    image.name(),
                    crate::api::js_error_message(&err)
                );
                None
            }
        }
    }

    fn release(&mut self, handle: Option<String>) {
        if let Some(url) = handle {
            if let Err(err) = Url::revoke_object_url(&url) {
                log::warn!("revokeObjectURL failed: {}", crate::api::js_error_message(&err));
            }
        }
    }
}
