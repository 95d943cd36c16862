//! Panoptic Caption Web App (Leptos + WASM)

mod app;
mod components;
mod preview;

pub mod api;
pub mod logger;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);
    leptos::mount::mount_to_body(app::App);
}
