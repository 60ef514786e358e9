//! Entry point for the Payroll Engine HTTP server.
//!
//! Loads the deduction schedule once at startup, then serves `GET /payroll`.
//! A schedule that fails validation stops the process before it binds.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

/// Net pay calculator for statutory contribution and withholding schedules.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory holding schedule.yaml, contribution.yaml and withholding.yaml.
    #[arg(long, env = "PAYROLL_CONFIG_DIR", default_value = "./config/br-2026")]
    config_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "PAYROLL_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: String,
}

/// Installs the tracing subscriber, honouring `RUST_LOG` and defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config_dir).with_context(|| {
        format!(
            "failed to load deduction schedule from {}",
            cli.config_dir.display()
        )
    })?;
    let metadata = config.metadata();
    info!(
        schedule = %metadata.code,
        version = %metadata.version,
        effective_date = %metadata.effective_date,
        "Deduction schedule loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(address = %cli.bind, "Payroll engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
