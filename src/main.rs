use anyhow::{bail, Context};
use box_scanner::{cli, config, report, AnalysisSession, AnalyzerClient};
use box_scanner_common::{HealthState, WorkflowState};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "box_scanner=debug" } else { "box_scanner=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn health_badge(state: HealthState) -> String {
    match state {
        HealthState::Online => format!("🟢 {}", state.label()),
        HealthState::Offline => format!("🔴 {}", state.label()),
        HealthState::Loading => format!("⏳ {}", state.label()),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("failed to load config")?;

    match cli.command {
        Commands::Health => {
            let client = AnalyzerClient::new(config.api_url(), config.api_token());
            let mut session = AnalysisSession::new(client);
            let state = session.check_health().await;
            println!("{}", health_badge(state));
        }

        Commands::Analyze { image, output, skip_health } => {
            println!("📦 box-scanner - 箱カウント解析\n");

            let client = AnalyzerClient::new(config.api_url(), config.api_token());
            let mut session = AnalysisSession::new(client);

            // 表示のみ。オフラインでも送信は行う
            if !skip_health {
                let state = session.check_health().await;
                println!("{}\n", health_badge(state));
            }

            let state = session
                .select_image(&image)
                .await
                .with_context(|| format!("failed to open {}", image.display()))?;
            if state == WorkflowState::Failed {
                if let Some(err) = session.error() {
                    bail!("{}", err);
                }
            }
            if let Some(preview) = session.workflow().preview() {
                println!("✔ {} ({})", image.display(), preview);
            }

            let bar = spinner("Analyzing...");
            let state = session.submit().await;
            bar.finish_and_clear();

            match state {
                WorkflowState::Succeeded => {
                    let Some(data) = session.result() else {
                        bail!("analysis finished without a result");
                    };
                    println!("{}", report::render(data));

                    if let Some(path) = output {
                        let file_name = session
                            .workflow()
                            .image()
                            .map(|i| i.file_name.clone())
                            .unwrap_or_default();
                        let saved = report::AnalysisReport::new(file_name, data.clone());
                        report::save_report(&path, &saved)?;
                        println!("\n✔ 結果を保存: {}", path.display());
                    }
                }
                _ => match session.error() {
                    Some(err) => bail!("{}", err),
                    None => bail!("analysis ended in state {}", state),
                },
            }
        }

        Commands::Config { set_api_url, set_api_token, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIのURLを設定しました");
            }

            if let Some(token) = set_api_token {
                config.set_api_token(token)?;
                println!("✔ APIトークンを設定しました");
            }

            if show {
                let url = config.api_url();
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  API URL: {}", if url.is_empty() { "未設定" } else { url.as_str() });
                println!(
                    "  APIトークン: {}",
                    if config.api_token().is_empty() { "未設定" } else { "設定済み" }
                );
            }
        }
    }

    Ok(())
}
