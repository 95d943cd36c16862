//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use panoptic_caption_common::{ComparisonView, RequestState, ServiceConfig, Session};
use web_sys::File;

use crate::api::post_caption;
use crate::components::{
    comparison_panel::ComparisonPanel,
    controls::Controls,
    header::Header,
    upload_area::UploadArea,
};
use crate::preview::ObjectUrlPreview;

/// 接続先はビルド時の `PANOPTIC_BACKEND_URL`、なければ既定値
pub fn service_config() -> ServiceConfig {
    match option_env!("PANOPTIC_BACKEND_URL") {
        Some(url) => ServiceConfig::with_base_url(url).unwrap_or_else(|err| {
            log::warn!("PANOPTIC_BACKEND_URL ignored: {}", err);
            ServiceConfig::default()
        }),
        None => ServiceConfig::default(),
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = service_config();
    log::info!("caption service: {}", config.base_url);

    // セッション本体（File は Send でないのでローカル保持）
    let session = StoredValue::new_local(Session::new(ObjectUrlPreview));
    let caption_url = StoredValue::new(config.caption_url());

    // 描画用に写したもの
    let (request_state, set_request_state) = signal(RequestState::Idle);
    let (preview_url, set_preview_url) = signal(None::<String>);
    let (has_selection, set_has_selection) = signal(false);
    let (top_k, set_top_k) = signal(config.default_top_k);

    let sync = move || {
        session.try_with_value(|s| {
            set_request_state.set(s.current_state().clone());
            set_preview_url.set(s.preview().cloned().flatten());
            set_has_selection.set(s.current_selection().is_some());
        });
    };

    // 画像選択ハンドラ
    let on_image_selected = move |file: File| {
        session.try_update_value(|s| s.select_image(Some(file)));
        sync();
    };

    // 送信ハンドラ
    let on_submit = move |_| {
        let pending = session
            .try_update_value(|s| s.submit(top_k.get_untracked()))
            .flatten();
        sync();

        let Some(pending) = pending else {
            return;
        };
        let url = caption_url.get_value();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = post_caption(&url, &pending.image, pending.top_k).await;
            let applied = session
                .try_update_value(|s| s.complete(pending.ticket, outcome))
                .unwrap_or(false);
            if applied {
                sync();
            }
        });
    };

    // 画面破棄時にObject URLを解放する
    on_cleanup(move || {
        session.try_update_value(|s| s.clear_selection());
    });

    view! {
        <div class="container">
            <Header />

            <UploadArea has_selection=has_selection on_image_selected=on_image_selected />

            <Controls
                top_k=top_k
                set_top_k=set_top_k
                has_selection=has_selection
                request_state=request_state
                on_submit=on_submit
            />

            {move || preview_url.get().map(|url| view! {
                <img class="preview" src=url alt="preview" />
            })}

            {move || request_state.with(|state| {
                state.error_message().map(|message| {
                    let message = message.to_string();
                    view! { <div class="error">"Error: " {message}</div> }
                })
            })}

            {move || request_state.with(ComparisonView::from_state).map(|comparison| view! {
                <ComparisonPanel comparison=comparison />
            })}
        </div>
    }
}
