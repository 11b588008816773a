//! TimePulse server
//!
//! Serves the engine and the entry store over HTTP.
//!
//! Environment:
//! - `TIMEPULSE_ADDR`: listen address, default `127.0.0.1:3000`
//! - `TIMEPULSE_DATA_DIR`: directory for the stored blobs; in-memory when unset
//! - `TIMEPULSE_POLICY`: YAML or JSON policy used until settings are saved
//! - `RUST_LOG`: tracing filter

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timepulse_engine::api::{AppState, create_router};
use timepulse_engine::config::{PayPolicy, PolicyLoader};
use timepulse_engine::store::{FileStore, MemoryStore};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

struct ServerConfig {
    addr: SocketAddr,
    data_dir: Option<PathBuf>,
    policy_path: Option<PathBuf>,
}

impl ServerConfig {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let addr = env::var("TIMEPULSE_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()?;
        Ok(Self {
            addr,
            data_dir: env::var_os("TIMEPULSE_DATA_DIR").map(PathBuf::from),
            policy_path: env::var_os("TIMEPULSE_POLICY").map(PathBuf::from),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        "Starting TimePulse"
    );

    let initial_policy = match &config.policy_path {
        Some(path) => PolicyLoader::load(path)?,
        None => PayPolicy::default(),
    };

    let state = match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "Using file store");
            AppState::open(FileStore::open(dir)?, initial_policy)?
        }
        None => {
            warn!("TIMEPULSE_DATA_DIR not set, entries will not survive a restart");
            AppState::open(MemoryStore::new(), initial_policy)?
        }
    };

    let app = create_router(state);

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,timepulse_engine=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
