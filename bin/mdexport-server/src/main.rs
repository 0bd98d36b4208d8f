//! mdexport-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from CLI flags / environment variables.
//! 2. Initialise structured tracing (JSON or pretty, optionally mirrored to a file).
//! 3. Build the pandoc converter and probe its version.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use clap::Parser;
use mdexport_core::PandocConverter;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::parse();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // Held until main returns so buffered file logs are flushed.
    let _log_guard = init_tracing(&cfg)?;

    info!(version = env!("CARGO_PKG_VERSION"), "mdexport-server starting");

    // ── 3. Converter ───────────────────────────────────────────────────────────
    let converter = PandocConverter::new(cfg.pandoc_config());
    match converter.version().await {
        Ok(version) => info!(
            program = %converter.program().display(),
            %version,
            "converter ready"
        ),
        Err(e) => warn!(
            program = %converter.program().display(),
            error = %e,
            "converter unavailable; /convert will fail until it is installed"
        ),
    }

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let addr = cfg.bind_address;
    let state = Arc::new(AppState {
        config: Arc::new(cfg),
        converter: Arc::new(converter),
    });
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mdexport-server stopped");
    Ok(())
}

/// Installs the global subscriber. Returns the file writer guard when
/// `--log-dir` is set.
fn init_tracing(cfg: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: MDEXPORT_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let stdout_layer = if cfg.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    };

    let (file_layer, guard) = match &cfg.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "mdexport-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
