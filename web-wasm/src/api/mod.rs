//! キャプションサービス呼び出し（fetch）

mod caption;

pub use caption::{js_error_message, post_caption};
