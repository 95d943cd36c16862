//! `POST /api/caption` をfetch + FormDataで送る

use panoptic_caption_common::service::{is_success, topk_field_value, FIELD_FILE, FIELD_TOPK};
use panoptic_caption_common::{interpret_response, ComparisonResult, Error};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// JS側の例外から表示用メッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let message = String::from(err.message());
        if !message.is_empty() {
            return message;
        }
    }
    value
        .as_string()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "network error".to_string())
}

fn transport_error(value: JsValue) -> Error {
    Error::Transport(js_error_message(&value))
}

/// 画像とtop-Kを送信する
///
/// # Arguments
/// * `url` - `{base}/api/caption`
/// * `file` - 選択中の画像
/// * `top_k` - 上位セグメント数
pub async fn post_caption(url: &str, file: &File, top_k: i64) -> Result<ComparisonResult, Error> {
    let form = FormData::new().map_err(transport_error)?;
    form.append_with_blob_and_filename(FIELD_FILE, file, &file.name())
        .map_err(transport_error)?;
    form.append_with_str(FIELD_TOPK, &topk_field_value(top_k))
        .map_err(transport_error)?;

    // Content-Typeはブラウザがboundary付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport_error)?;

    let window = web_sys::window()
        .ok_or_else(|| Error::Transport("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?;
    let resp: Response = resp_value.dyn_into().map_err(transport_error)?;

    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(transport_error)?).await;
    let body = match text {
        Ok(value) => value.as_string().unwrap_or_default(),
        Err(_) if !is_success(status) => String::new(),
        Err(err) => return Err(transport_error(err)),
    };

    interpret_response(status, &body)
}
