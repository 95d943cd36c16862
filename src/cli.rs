use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panoptic-caption")]
#[command(about = "ベースライン/パノプティック対応キャプションの比較クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// キャプションサービスのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して2種類のキャプションを比較
    Caption {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 考慮する上位セグメント数（省略時は設定値）
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top_k: Option<i64>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// サービスの稼働確認
    Health,

    /// 設定を表示/編集
    Config {
        /// サービスURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
