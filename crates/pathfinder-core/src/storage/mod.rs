mod config;
pub mod database;
pub mod keys;
pub mod store;

pub use config::{ApiConfig, Config, FlowConfig, LogConfig};
pub use database::SqliteStore;
pub use store::{LocalStore, MemoryStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/pathfinder[-dev]/` based on PATHFINDER_ENV.
///
/// Set PATHFINDER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PATHFINDER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pathfinder-dev")
    } else {
        base_dir.join("pathfinder")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
