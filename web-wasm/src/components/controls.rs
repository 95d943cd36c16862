//! Top-K入力と送信ボタン

use leptos::prelude::*;
use panoptic_caption_common::RequestState;

#[component]
pub fn Controls<FS>(
    top_k: ReadSignal<i64>,
    set_top_k: WriteSignal<i64>,
    has_selection: ReadSignal<bool>,
    request_state: ReadSignal<RequestState>,
    on_submit: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
{
    let is_submitting = move || request_state.with(RequestState::is_submitting);

    view! {
        <div class="controls">
            <label for="topk">"Top-K: "</label>
            <input
                type="number"
                id="topk"
                class="topk-input"
                prop:value=move || top_k.get().to_string()
                on:input=move |ev| {
                    // 範囲はサービス側で判定する
                    if let Ok(value) = event_target_value(&ev).trim().parse::<i64>() {
                        set_top_k.set(value);
                    }
                }
            />
            <button
                class="btn btn-primary"
                disabled=move || !has_selection.get() || is_submitting()
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                {move || if is_submitting() { "Processing…" } else { "Generate" }}
            </button>
        </div>
    }
}
