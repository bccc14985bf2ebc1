use std::process::ExitCode;

use clap::Parser;
use ragtube_client::video::extract_video_id;
use ragtube_client::{RagtubeClient, SessionPhase};
use ragtube_core::RagtubeConfig;
use tracing::info;

mod chat;
mod cli;
mod render;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // stderr only: stdout carries the answer text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ragtube_cli=info,ragtube_client=warn,ragtube_core=warn".into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > RAGTUBE_CONFIG env > ~/.ragtube/ragtube.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("RAGTUBE_CONFIG").ok());
    let mut config = RagtubeConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(code = e.code(), "Config load failed ({}), using defaults", e);
        RagtubeConfig::default()
    });
    if let Some(base) = cli.api_base {
        config.api.base_url = base;
    }
    info!(base_url = %config.api.base_url, "using backend");

    let client = RagtubeClient::from_config(&config)?;

    match cli.command {
        Command::Ask { question } => {
            let phase = render::stream_answer(&client, &question.join(" ")).await?;
            Ok(exit_code(phase == SessionPhase::Failed))
        }
        Command::Ingest { url } => {
            let ok = ingest(&client, &url).await;
            Ok(exit_code(!ok))
        }
        Command::Chat => {
            chat::run(&client).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run one ingest and print its outcome. Returns true when the video was stored.
pub(crate) async fn ingest(client: &RagtubeClient, url: &str) -> bool {
    match client.ingest().run(url).await {
        Ok(status) => {
            println!("{}: {}", status.label(), status.summary());
            if status.is_ingested() {
                println!(
                    "Video: {} • {} chunks",
                    extract_video_id(url.trim()),
                    status.chunks.unwrap_or(0)
                );
            }
            status.is_ingested()
        }
        Err(_) => {
            eprintln!("error: {}", client.surface().snapshot().error);
            false
        }
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
