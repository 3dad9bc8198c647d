use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use ironroll::config::{IronrollConfig, LogFormat};
use ironroll::http::{AppState, HttpServer};
use ironroll::ratelimit::RateLimiter;
use ironroll::roll::RollEngine;

/// Ironsworn dice roll service.
#[derive(Parser, Debug)]
#[command(name = "ironroll", version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "IRONROLL_CONFIG")]
    config: Option<PathBuf>,

    /// Port for the HTTP API, overriding the configured address
    #[arg(short, long)]
    port: Option<u16>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_file_loaded = IronrollConfig::load_env_file(".env")?;
    let mut config = IronrollConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.set_port(port);
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    ironroll::logging::init(&config.logging);

    info!("Starting Ironroll");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        http_addr = %config.server.http_addr,
        env_file = env_file_loaded,
        "Configuration loaded"
    );

    let engine = Arc::new(RollEngine::from_entropy());

    let rate_limiter = Arc::new(RateLimiter::with_config(
        config.rate_limiting.limit_config(),
    ));
    info!("Rate limiter initialized");

    let server = HttpServer::new(
        config.server.http_addr,
        AppState::new(engine, rate_limiter),
    );

    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("Ironroll stopped");
    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other one still works.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    info!(signal = received, "Stopping HTTP API after in-flight rolls finish");
}
