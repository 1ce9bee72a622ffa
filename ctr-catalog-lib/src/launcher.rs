//! Hands a located image to the external emulator.

use std::path::PathBuf;
use std::process::{Child, Command};

use ctr_catalog_core::GameRecord;

use crate::error::LaunchError;

/// Launches games through a configured emulator executable.
#[derive(Debug, Clone)]
pub struct EmulatorLauncher {
    executable: PathBuf,
}

impl EmulatorLauncher {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Spawn the emulator with the game's image path as its argument.
    ///
    /// The child runs detached; the caller decides whether to keep the
    /// handle or let the process outlive it.
    pub fn launch(&self, game: &GameRecord) -> Result<Child, LaunchError> {
        if !self.executable.is_file() {
            return Err(LaunchError::MissingExecutable(self.executable.clone()));
        }

        log::info!(
            "launching {} with {}",
            self.executable.display(),
            game.source_path.display()
        );
        let child = Command::new(&self.executable)
            .arg(&game.source_path)
            .spawn()?;
        Ok(child)
    }
}
