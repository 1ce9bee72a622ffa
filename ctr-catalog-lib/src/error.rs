use std::path::PathBuf;
use thiserror::Error;

/// Errors building a catalog.
///
/// Per-file probe failures are not errors at this level; they are collected
/// in the catalog's accounting so a scan always covers the whole tree.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured games directory could not be read.
    #[error("failed to read games directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors launching the external emulator.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configured executable does not exist.
    #[error("emulator executable not found: {0}")]
    MissingExecutable(PathBuf),

    /// The process could not be spawned.
    #[error("failed to launch emulator: {0}")]
    Spawn(#[from] std::io::Error),
}
