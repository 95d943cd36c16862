use eframe::egui;
use panoptic_caption_common::{ImageFile, PreviewProvider};

/// プレビューの最大サイズ
const PREVIEW_MAX: (u32, u32) = (1024, 768);

/// 選択画像をテクスチャとして保持する
///
/// 解放は最後の `TextureHandle` がdropされた時点でegui側が行う。
pub struct TexturePreview {
    ctx: egui::Context,
}

impl TexturePreview {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

/// デコードできない画像はテクスチャなし（送信はできる）
pub type PreviewHandle = Option<egui::TextureHandle>;

impl PreviewProvider for TexturePreview {
    type Image = ImageFile;
    type Handle = PreviewHandle;

    fn create(&mut self, image: &ImageFile) -> PreviewHandle {
        let decoded = match image::load_from_memory(&image.bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::warn!("preview decode failed for {}: {}", image.file_name, err);
                return None;
            }
        };

        let thumb = decoded.thumbnail(PREVIEW_MAX.0, PREVIEW_MAX.1);
        let size = [thumb.width() as usize, thumb.height() as usize];
        let pixels = thumb.to_rgba8().into_raw();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
        Some(self.ctx.load_texture(
            format!("preview:{}", image.file_name),
            color_image,
            egui::TextureOptions::default(),
        ))
    }

    fn release(&mut self, handle: PreviewHandle) {
        if let Some(texture) = handle {
            log::debug!("releasing preview texture {:?}", texture.id());
            drop(texture);
        }
    }
}
