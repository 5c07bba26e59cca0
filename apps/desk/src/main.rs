use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{HttpPolicyApi, PolicyController};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
    task::JoinSet,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod orchestration;
mod render;

use commands::{parse_line, DeskCommand, HELP};
use config::{load_settings, normalize_api_url};

#[derive(Parser, Debug)]
#[command(name = "desk", version, about = "Ask questions about company policies")]
struct Args {
    /// Base URL of the policy backend.
    #[arg(long)]
    api_url: Option<String>,
    /// Config file; defaults to ./desk.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the retrieved snippets under each document answer.
    #[arg(long)]
    show_context: bool,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }
    settings.show_context |= args.show_context;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let api_url = normalize_api_url(&settings.api_url)?;
    info!(%api_url, "starting policy desk");
    let controller = PolicyController::new(Arc::new(HttpPolicyApi::new(api_url)));

    let mut events = controller.subscribe_events();
    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("{}", render::render_event(&event)),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "renderer fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut tasks = JoinSet::new();
    {
        let controller = Arc::clone(&controller);
        tasks.spawn(async move {
            if let Err(err) = controller.list_policies().await {
                error!(error = %err, "failed to load policy catalog");
            }
        });
    }

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(DeskCommand::Quit)) => break,
            Ok(Some(DeskCommand::Help)) => println!("{HELP}"),
            Ok(Some(command)) => orchestration::dispatch(
                &mut tasks,
                Arc::clone(&controller),
                command,
                settings.show_context,
            ),
            Err(message) => println!("{message}"),
        }
    }

    orchestration::drain(&mut tasks).await;
    // Last sender goes away with the controller, which lets the renderer flush and stop.
    drop(controller);
    renderer.await?;

    Ok(())
}
