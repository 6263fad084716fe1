//! TESS DV Fast HTTP Server Binary
//!
//! This is the main entry point for the TCE lookup server. It resolves the
//! database location, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! TESS_DB_BASE_PATH=/srv/tess cargo run --bin tess-dv-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `TESS_DB_BASE_PATH`: directory containing `data/tess_dv_fast/` (default:
//!   the executable's directory)
//! - `TESS_DV_CONFIG`: optional TOML file with a `[database]` table; takes
//!   precedence over `TESS_DB_BASE_PATH`
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tess_dv_fast::build_info::BuildInfo;
use tess_dv_fast::db::{DatabaseConfig, SqliteRepository, TceRepository};
use tess_dv_fast::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting TESS DV Fast HTTP Server");

    let config = DatabaseConfig::resolve().map_err(|e| anyhow::anyhow!(e))?;
    info!(
        spoc = %config.spoc_db_path().display(),
        tess_spoc = %config.tess_spoc_db_path().display(),
        "Using TCE databases"
    );

    let repository = SqliteRepository::new(config);
    let (spoc_ok, tess_spoc_ok) = repository.health_check().await?;
    if !spoc_ok || !tess_spoc_ok {
        warn!(spoc_ok, tess_spoc_ok, "Not all TCE databases are readable");
    }

    let build = BuildInfo::from_executable_dir();
    info!(build = %build.short_sha(), "Build info loaded");

    // Create application state
    let state = AppState::new(Arc::new(repository)).with_build_info(build);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
