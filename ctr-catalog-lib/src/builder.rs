//! Catalog construction: walk a games directory and probe every file.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;

use ctr_catalog_core::{GameRecord, NullObserver, ProbeError, ProbeObserver, ProbeOutcome};

use crate::error::CatalogError;
use crate::walker::collect_files;

/// Explicit configuration for a catalog build.
///
/// Passed in by the caller at construction time; nothing is read from
/// process-wide state.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory tree to scan for cartridge images.
    pub roms_path: PathBuf,
}

/// A built game catalog with a program-id lookup index.
#[derive(Debug, Default)]
pub struct Catalog {
    games: Vec<GameRecord>,
    by_id: HashMap<String, usize>,
    skipped: usize,
    io_errors: Vec<(PathBuf, ProbeError)>,
}

impl Catalog {
    /// All cataloged games, in scan order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Look up a game by program id.
    pub fn get(&self, program_id: &str) -> Option<&GameRecord> {
        self.by_id.get(program_id).map(|&i| &self.games[i])
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Count of scanned files that failed a structural gate. Expected to be
    /// most of any real directory.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Files that could not be read at all.
    pub fn io_errors(&self) -> &[(PathBuf, ProbeError)] {
        &self.io_errors
    }

    fn insert(&mut self, record: GameRecord) {
        match self.by_id.entry(record.program_id.clone()) {
            Entry::Occupied(existing) => {
                // Two dumps of the same title: both stay listed, the first
                // one found keeps the index slot.
                log::warn!(
                    "duplicate program id {} at {} (lookup keeps {})",
                    record.program_id,
                    record.source_path.display(),
                    self.games[*existing.get()].source_path.display(),
                );
                self.games.push(record);
            }
            Entry::Vacant(slot) => {
                slot.insert(self.games.len());
                self.games.push(record);
            }
        }
    }
}

/// Builds a [`Catalog`] from a configured games directory.
#[derive(Debug)]
pub struct CatalogBuilder {
    config: CatalogConfig,
}

impl CatalogBuilder {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Walk the directory tree and probe every file.
    ///
    /// Files that fail a structural gate are counted and skipped; files that
    /// cannot be read are logged and collected. Neither aborts the scan;
    /// only an unreadable root directory does.
    pub fn build(&self) -> Result<Catalog, CatalogError> {
        self.build_with_observer(&NullObserver)
    }

    /// Like [`build`](Self::build), reporting per-file diagnostics to
    /// `observer`.
    pub fn build_with_observer(
        &self,
        observer: &dyn ProbeObserver,
    ) -> Result<Catalog, CatalogError> {
        let files = collect_files(&self.config.roms_path).map_err(|source| CatalogError::Walk {
            path: self.config.roms_path.clone(),
            source,
        })?;
        log::info!(
            "scanning {} files under {}",
            files.len(),
            self.config.roms_path.display()
        );

        let mut catalog = Catalog::default();
        for path in files {
            match ctr_catalog_core::probe_with_observer(&path, observer) {
                Ok(ProbeOutcome::Game(record)) => {
                    log::debug!("cataloged {} ({})", record.title, record.program_id);
                    catalog.insert(record);
                }
                Ok(ProbeOutcome::NotAGame) => catalog.skipped += 1,
                Err(e) => {
                    log::warn!("could not read {}: {}", path.display(), e);
                    catalog.io_errors.push((path, e));
                }
            }
        }
        Ok(catalog)
    }
}
