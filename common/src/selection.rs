//! 画像選択とプレビューハンドルの管理
//!
//! プレビューハンドルはスキンごとに異なる（ブラウザはObject URL、
//! デスクトップはテクスチャ）。生成と解放は [`PreviewProvider`] に任せ、
//! ここでは「ハンドルは画像がある間だけ、常に1つだけ生きている」ことを保証する。

/// プレビューハンドルの生成/解放
pub trait PreviewProvider {
    type Image;
    type Handle;

    fn create(&mut self, image: &Self::Image) -> Self::Handle;

    fn release(&mut self, handle: Self::Handle);
}

/// プレビューを持たないスキン（CLI）用
pub struct NoPreview<I> {
    _image: std::marker::PhantomData<I>,
}

impl<I> Default for NoPreview<I> {
    fn default() -> Self {
        Self {
            _image: std::marker::PhantomData,
        }
    }
}

impl<I> PreviewProvider for NoPreview<I> {
    type Image = I;
    type Handle = ();

    fn create(&mut self, _image: &I) {}

    fn release(&mut self, _handle: ()) {}
}

/// 選択中の画像とそのプレビュー
#[derive(Debug)]
pub struct Selection<I, H> {
    image: I,
    preview: H,
}

impl<I, H> Selection<I, H> {
    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn preview(&self) -> &H {
        &self.preview
    }
}

/// 選択マネージャ
pub struct SelectionManager<P: PreviewProvider> {
    provider: P,
    current: Option<Selection<P::Image, P::Handle>>,
}

impl<P: PreviewProvider> SelectionManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    /// 画像を選択する。`None` は何もしない。
    ///
    /// 既存のプレビューを解放してから新しいプレビューを作る。
    /// 選択が変わった場合に `true` を返す。
    pub fn select_image(&mut self, image: Option<P::Image>) -> bool {
        let Some(image) = image else {
            return false;
        };

        self.release_current();
        let preview = self.provider.create(&image);
        self.current = Some(Selection { image, preview });
        true
    }

    pub fn current_selection(&self) -> Option<&Selection<P::Image, P::Handle>> {
        self.current.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.current.is_some()
    }

    /// 選択を破棄してプレビューを解放する
    pub fn clear(&mut self) {
        self.release_current();
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            self.provider.release(previous.preview);
        }
    }
}

impl<P: PreviewProvider> Drop for SelectionManager<P> {
    fn drop(&mut self) {
        self.release_current();
    }
}
