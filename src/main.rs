use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use panoptic_caption::{cli, client, config, error, loader, report, runner};
use panoptic_caption_common::{ComparisonView, RequestState};
use cli::{Cli, Commands};
use client::CaptionClient;
use config::Config;
use error::{CaptionCliError, Result};
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::load()?;

    match cli.command {
        Commands::Caption { image, top_k, json } => {
            let service = config.resolve_service(cli.base_url.as_deref())?;
            let top_k = top_k.unwrap_or(service.default_top_k);

            let image = loader::load_image(&image)?;
            if !json {
                println!("🖼  {} (Top-K: {})", image.file_name, top_k);
            }

            let client = CaptionClient::new(service);
            let pb = spinner(&format!("Processing… {}", client.config().caption_url()));
            let state = runner::caption_once(&client, image, top_k).await;
            pb.finish_and_clear();

            match &state {
                RequestState::Succeeded(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(result)?);
                    } else {
                        println!();
                        print!("{}", report::format_report(&ComparisonView::from_result(result)));
                    }
                }
                RequestState::Failed(message) => {
                    return Err(CaptionCliError::CaptionFailed(message.clone()));
                }
                RequestState::Idle | RequestState::Submitting => {
                    // caption_once は必ず確定状態を返す
                    log::warn!("request did not settle: {}", state.as_str());
                }
            }
        }

        Commands::Health => {
            let service = config.resolve_service(cli.base_url.as_deref())?;
            let client = CaptionClient::new(service);
            let url = client.config().health_url();

            match client.health().await {
                Ok(health) if health.is_ok() => println!("✔ {} ok", url),
                Ok(health) => {
                    return Err(CaptionCliError::Unhealthy(format!("{} status={}", url, health.status)));
                }
                Err(e) => {
                    return Err(CaptionCliError::Unhealthy(format!("{}: {}", url, e.user_message())));
                }
            }
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ サービスURLを設定しました: {}", config.service.base_url);
            }

            if show {
                let effective = config.resolve_service(cli.base_url.as_deref())?;
                println!("設定:");
                println!("  サービスURL: {}", config.service.base_url);
                println!("  実際の接続先: {}", effective.base_url);
                println!("  タイムアウト: {}秒", config.service.timeout_seconds);
                println!("  Top-K既定値: {}", config.service.default_top_k);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
