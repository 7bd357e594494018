//! Docso Bot Binary
//!
//! Reads chat events as JSON lines on stdin and writes message operations as
//! JSON lines on stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Serve indexes from ./docs
//! docso
//!
//! # With a config file and another index directory
//! DOCSO_CONFIG=docso.json DOCSO_DOCS_DIR=/srv/docs docso
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use docso_bot::{
    server, Bot, BotConfig, CachedIndexProvider, FileIndexProvider, StdioChannel, BOT_VERSION,
};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docso")]
#[command(author, version, about = "Documentation lookup bot speaking JSON lines on stdio")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "DOCSO_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding `<pkg>.json` index files
    #[arg(short, long, env = "DOCSO_DOCS_DIR")]
    docs_dir: Option<PathBuf>,

    /// Command prefix
    #[arg(short, long)]
    prefix: Option<String>,

    /// Only the caller who opened a listing may navigate it
    #[arg(long)]
    owner_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries outbound records, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docso=info,docso_bot=info,docso_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::default(),
    };
    if let Some(dir) = cli.docs_dir {
        config.docs_dir = dir;
    }
    if let Some(prefix) = cli.prefix {
        config.prefix = prefix;
    }
    if cli.owner_only {
        config.pagination.owner_only = true;
    }
    config.validate()?;

    tracing::info!(
        docs_dir = %config.docs_dir.display(),
        prefix = %config.prefix,
        "Starting docso v{}",
        BOT_VERSION
    );

    let provider = Arc::new(CachedIndexProvider::new(
        FileIndexProvider::new(&config.docs_dir),
        config.cache.clone(),
    ));
    let sweep_every = config.pagination.sweep_interval();
    let bot = Arc::new(Bot::new(config, provider, Arc::new(StdioChannel::stdout())));

    let sweeper = server::spawn_sweeper(Arc::clone(&bot), sweep_every);

    tracing::info!("ready, listening on stdio");
    let summary = server::run(bot, BufReader::new(tokio::io::stdin())).await;
    sweeper.abort();
    summary?;

    Ok(())
}
