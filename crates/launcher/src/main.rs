// Interactive fungible token launcher
//
// Walks the operator through wallet setup, funding, token details and
// metadata upload, then creates the token on the selected network.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use token_launcher::{
    config::CONFIG_FILE, console, HttpUploader, LaunchConfig, LaunchError, Launcher,
    RpcChainClient, TerminalPrompter,
};

#[derive(Parser)]
#[command(name = "token-launcher")]
#[command(about = "Create a fungible token with metadata on Solana", long_about = None)]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<LaunchError>() {
            Some(LaunchError::Cancelled) => {
                console::info("Launch cancelled, nothing was submitted");
                ExitCode::SUCCESS
            }
            _ => {
                console::error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        },
    }
}

async fn run() -> Result<()> {
    let config = LaunchConfig::load_or_default(CONFIG_FILE)
        .with_context(|| format!("Failed to load {}", CONFIG_FILE))?;
    init_logging(&config);

    tracing::info!(wallet = %config.wallet_path.display(), upload_url = %config.upload_url, "Starting token launcher");

    let uploader = HttpUploader::new(config.upload_url.clone(), config.created_on.clone());
    let mut prompter = TerminalPrompter::new();

    let launch = Launcher::new(&config, &uploader)
        .run(&mut prompter, RpcChainClient::new)
        .await?;

    tracing::info!(mint = %launch.receipt.mint, network = launch.network.label(), "Launch complete");
    Ok(())
}

fn init_logging(config: &LaunchConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("token_launcher={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
