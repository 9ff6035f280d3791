// crates/server/src/main.rs
//! Mediadrop server binary.
//!
//! Binds the HTTP listener and serves the API. Uploaded files persist under
//! the data directory across restarts; job records are in-memory only and
//! start empty on every boot.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use mediadrop_core::BlobStore;
use mediadrop_server::create_app;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Default port for the server.
const DEFAULT_PORT: u16 = 47910;

/// Default directory for uploaded files, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "files";

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("MEDIADROP_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get the blob store root from environment or use default.
fn get_data_dir() -> PathBuf {
    std::env::var("MEDIADROP_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = get_data_dir();
    let store = BlobStore::open(data_dir.clone())?;
    tracing::info!(data_dir = %data_dir.display(), "blob store ready");

    let app = create_app(store);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "mediadrop listening");

    axum::serve(listener, app).await?;

    Ok(())
}
