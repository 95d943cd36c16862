//! 画像選択エリアコンポーネント

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

/// 先頭の画像ファイルだけを取り出す
fn first_image(files: &FileList) -> Option<File> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .find(|file| file.type_().starts_with("image/"))
}

#[component]
pub fn UploadArea<F>(
    has_selection: ReadSignal<bool>,
    on_image_selected: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<Input> = NodeRef::new();

    let on_drop = {
        let on_image_selected = on_image_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| first_image(&files))
            {
                on_image_selected(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        // キャンセル時はファイルなし（何もしない）
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_image_selected(file);
        }
        // 同じファイルを選び直してもchangeが発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if has_selection.get() {
                    classes.push("has-selection");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <div class="upload-icon">"🖼"</div>
            <Show
                when=move || has_selection.get()
                fallback=|| view! { <p>"画像をドラッグ&ドロップ または クリックして選択"</p> }
            >
                <p>"別の画像を選ぶとクリックまたはドロップで差し替え"</p>
            </Show>
            <p class="text-muted">"対応形式: JPEG, PNG, GIF, WebP, BMP"</p>
        </div>
    }
}
