//! CLIでの1回分の選択 → 送信 → 結果確定

use crate::client::CaptionClient;
use panoptic_caption_common::{ImageFile, NoPreview, RequestState, Session};

/// 画像を1枚選択して送信し、確定した状態を返す
///
/// 失敗も `RequestState::Failed` として返る（エラーにはならない）。
pub async fn caption_once(client: &CaptionClient, image: ImageFile, top_k: i64) -> RequestState {
    let mut session = Session::new(NoPreview::<ImageFile>::default());
    session.select_image(Some(image));

    let Some(pending) = session.submit(top_k) else {
        return session.current_state().clone();
    };

    let outcome = client.caption(&pending.image, pending.top_k).await;
    session.complete(pending.ticket, outcome);
    session.current_state().clone()
}
