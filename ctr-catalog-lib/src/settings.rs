//! Persisted library settings.
//!
//! Stored as TOML in the platform config directory. Loading is lenient (a
//! missing or corrupt file yields defaults) and saving is atomic, so a
//! crash mid-write never leaves a half-written settings file behind.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-configured paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Directory tree holding cartridge images.
    pub roms_path: Option<PathBuf>,
    /// Full path to the emulator executable used for launching.
    pub emulator_path: Option<PathBuf>,
}

/// Returns `~/.config/ctr-catalog/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("ctr-catalog").join("settings.toml")
}

/// Load settings from the default location.
pub fn load_settings() -> LibrarySettings {
    load_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_from(path: &Path) -> LibrarySettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            LibrarySettings::default()
        }),
        Err(_) => LibrarySettings::default(),
    }
}

/// Save settings to the default location.
pub fn save_settings(settings: &LibrarySettings) -> std::io::Result<()> {
    save_to(settings, &settings_path())
}

/// Save settings to `path` atomically (write to temp, then rename).
pub fn save_to(settings: &LibrarySettings, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");

        let settings = LibrarySettings {
            roms_path: Some(PathBuf::from("/games/handheld")),
            emulator_path: Some(PathBuf::from("/opt/emulator/emulator-qt")),
        };
        save_to(&settings, &path).unwrap();
        assert_eq!(load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let loaded = load_from(&tmp.path().join("nope.toml"));
        assert_eq!(loaded, LibrarySettings::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "roms_path = [not toml").unwrap();
        assert_eq!(load_from(&path), LibrarySettings::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep").join("settings.toml");
        save_to(&LibrarySettings::default(), &path).unwrap();
        assert!(path.is_file());
    }
}
