//! # bizdesk
//!
//! Command-line front end for the Bizdesk backend.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Process Startup                                   │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize logging                                                  │
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • Default: warn, bizdesk crates at info; RUST_LOG overrides         │
//! │  3. Load ClientConfig (file → env → --api-base)                         │
//! │  4. Restore the session from the session file                           │
//! │  5. Run the command through Dashboard<TerminalUi>                       │
//! │  6. Exit non-zero if the command failed                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bizdesk_client::{ApiClient, ClientConfig, Dashboard, FileSessionStore, SessionContext};

use crate::cli::Cli;
use crate::terminal::TerminalUi;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ClientConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(base) = cli.api_base.clone() {
        config.api.base_url = base;
        config.validate().context("--api-base")?;
    }
    debug!(base_url = %config.base_url(), "Configuration loaded");

    let session_path = config
        .session_path()
        .context("no data directory for the session file; set BIZDESK_SESSION_FILE")?;
    debug!(path = ?session_path, "Session file");

    let store = Arc::new(FileSessionStore::new(session_path));
    let client = ApiClient::from_config(&config, SessionContext::restore(store))
        .context("creating HTTP client")?;

    let ui = TerminalUi::stdio().with_currency_prefix(config.currency_prefix());
    let mut app = Dashboard::new(client, ui).with_currency_prefix(config.currency_prefix());

    match commands::run(&mut app, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including each API call
/// - `RUST_LOG=bizdesk_client=trace` - Trace the client crate only
/// - Default: WARN, INFO for bizdesk crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bizdesk=info,bizdesk_client=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
