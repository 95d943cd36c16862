//! Panoptic Caption CLI
//!
//! 画像1枚をキャプションサービスに送り、ベースラインとパノプティック対応の
//! キャプション・メトリクスを並べて表示する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod runner;
