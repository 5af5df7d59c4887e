//! Taskboard HTTP server entry point.
//!
//! Usage:
//!
//! ```text
//! server [snapshot-file]
//! ```
//!
//! The snapshot file defaults to `taskboard.csv` in the working directory
//! and is created on the first mutation if missing. The bind address comes
//! from `TASKBOARD_ADDR` (default `127.0.0.1:8080`); log filtering follows
//! `RUST_LOG`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::tracker::adapters::file::FileArchive;
use taskboard::tracker::adapters::http::{AppState, serve};
use taskboard::tracker::ports::Archive;
use taskboard::tracker::services::TaskStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(cause) => {
            error!(%cause, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let snapshot_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("taskboard.csv"), PathBuf::from);
    let dir = snapshot_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = snapshot_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("snapshot path has no file name")?
        .to_owned();

    let archive = FileArchive::open(dir, file_name)?;
    let store = if archive.exists() {
        let snapshot = archive.load()?;
        let store = TaskStore::from_snapshot(snapshot)?;
        info!(path = %snapshot_path.display(), "restored snapshot");
        store
    } else {
        info!(path = %snapshot_path.display(), "no snapshot file; starting empty");
        TaskStore::new()
    };

    let addr: SocketAddr = std::env::var("TASKBOARD_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_owned())
        .parse()?;
    let archive: Arc<dyn Archive> = Arc::new(archive);
    let state = AppState::new(store, Some(archive));
    serve(addr, state).await?;
    Ok(())
}
