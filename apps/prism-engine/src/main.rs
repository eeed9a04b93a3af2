//! PRISM Engine Binary
//!
//! Serves the exposure and live probability API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin prism-engine
//! ```
//!
//! # Environment Variables
//!
//! - `PRISM_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides the configured level
//!
//! Any `${VAR}` referenced from the config file is read from the
//! environment, after loading `.env`.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use prism_engine::application::ports::StorePort;
use prism_engine::application::services::SignalCollector;
use prism_engine::application::use_cases::{ProbabilityEngine, initialize_catalog};
use prism_engine::config::{CONFIG_PATH_ENV, Config, StoreBackend, load_config};
use prism_engine::domain::risk_catalog::seed_risks;
use prism_engine::infrastructure::http::{AppState, create_router};
use prism_engine::infrastructure::persistence::{InMemoryStore, TursoStore};
use prism_engine::infrastructure::scheduler::UpdateScheduler;
use prism_engine::infrastructure::signals::build_sources;
use prism_engine::observability::{MetricsConfig, init_logging, init_metrics};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_engine_config()?;
    init_logging(
        &config.observability.logging.level,
        config.observability.logging.format,
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = config.server.http_port,
        backend = ?config.persistence.backend,
        sources = ?config.signals.enabled_sources,
        "Starting PRISM engine"
    );

    if let Some(port) = config.observability.metrics_port {
        let addr: SocketAddr = format!("{}:{port}", config.server.bind_address)
            .parse()
            .context("invalid metrics address")?;
        init_metrics(&MetricsConfig::with_addr(addr))?;
    }

    match config.persistence.backend {
        StoreBackend::Memory => run(&config, Arc::new(InMemoryStore::new())).await,
        StoreBackend::Turso => {
            let path = &config.persistence.db_path;
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating database directory for {path}"))?;
            }
            let store = TursoStore::open(path)
                .await
                .with_context(|| format!("opening database {path}"))?;
            run(&config, Arc::new(store)).await
        }
    }
}

/// Wire the engine onto `store` and serve until shutdown.
async fn run<S>(config: &Config, store: Arc<S>) -> anyhow::Result<()>
where
    S: StorePort + 'static,
{
    let seeded = initialize_catalog(store.as_ref(), &seed_risks()?).await?;
    tracing::info!(
        seeded,
        updates = store.count_updates().await?,
        signals = store.count_signals().await?,
        "Store ready"
    );

    let signals = &config.signals;
    let sources = build_sources(&signals.enabled_sources, &signals.geography)?;
    let collector = SignalCollector::new(sources, signals.source_timeout());
    let engine = Arc::new(ProbabilityEngine::new(Arc::clone(&store), collector));

    let shutdown = CancellationToken::new();
    let scheduler = match signals.update_interval() {
        Some(interval) => {
            let scheduler =
                UpdateScheduler::new(Arc::clone(&engine), interval, signals.run_on_startup);
            Some(tokio::spawn(scheduler.run(shutdown.clone())))
        }
        None => {
            if signals.run_on_startup {
                let summary = engine.update_all_probabilities().await?;
                tracing::info!(
                    risks_updated = summary.risks_updated,
                    "Initial probability update completed"
                );
            }
            None
        }
    };

    let app = create_router(AppState::new(store, engine));
    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    if let Some(handle) = scheduler
        && tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err()
    {
        tracing::warn!("Scheduler did not stop within the shutdown timeout");
    }

    tracing::info!("PRISM engine stopped");
    Ok(())
}

/// Load the config file, falling back to defaults when the default path is absent.
fn load_engine_config() -> anyhow::Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV).is_ok();
    if !explicit && !Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Ok(Config::default());
    }
    Ok(load_config(None)?)
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for SIGTERM, SIGINT or cancellation, then cancel `shutdown`.
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
        () = shutdown.cancelled() => {}
    }

    shutdown.cancel();
    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
