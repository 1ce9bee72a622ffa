//! Recursive file enumeration for the games directory.
//!
//! The probe decides what is and is not a game, so the walker collects every
//! file regardless of extension. Order is deterministic: entries are sorted
//! per directory and subdirectories are descended depth-first.

use std::path::{Path, PathBuf};

/// Collect every file under `root`, sorted.
///
/// An unreadable `root` is an error; unreadable subdirectories are logged
/// and skipped so one bad directory cannot hide the rest of the library.
pub fn collect_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    descend(root, &mut files, true)?;
    Ok(files)
}

fn descend(dir: &Path, files: &mut Vec<PathBuf>, is_root: bool) -> std::io::Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if is_root => return Err(e),
        Err(e) => {
            log::warn!("skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            descend(&path, files, false)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
