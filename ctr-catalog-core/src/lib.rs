//! Decoder for 3DS cartridge-image containers.
//!
//! Walks the container chain inside a dumped game card image (outer NCSD
//! partition table, NCCH content partition, embedded ExeFS file table, SMDH
//! icon/metadata block) to extract a stable program id and a locale-resolved
//! display title, without executing any game code.
//!
//! The decoder is built for directory scans: callers feed it every file they
//! find, and anything that does not match the expected shape comes back as
//! [`ProbeOutcome::NotAGame`] rather than an error. Only genuine I/O failures
//! (open denied, device error) surface as [`ProbeError`].

use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};
use std::path::PathBuf;

pub mod error;
pub mod exefs;
mod layout;
pub mod observer;
pub mod probe;
pub mod smdh;
pub(crate) mod util;

pub use error::ProbeError;
pub use exefs::ExeFsDir;
pub use observer::{NullObserver, ProbeEvent, ProbeObserver, SkipReason};
pub use probe::{probe, probe_reader, probe_with_observer};
pub use smdh::{TitleLanguage, TitleRecord};

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A cataloged game image.
///
/// Produced only by a fully successful probe. Nothing mutates a record after
/// construction; the caller owns it once the probe returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 10-character ASCII identifier, unique per title and region.
    pub program_id: String,
    /// Locale-resolved display title (English preferred, Japanese fallback).
    pub title: String,
    /// The file the record was probed from.
    pub source_path: PathBuf,
}

/// Result of probing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The file is a recognized cartridge image.
    Game(GameRecord),
    /// The file failed a structural gate and should be skipped.
    ///
    /// This is the common case when scanning arbitrary directories and
    /// deliberately carries no detail; diagnostic-minded callers can inject
    /// a [`ProbeObserver`] to see which gate rejected the file.
    NotAGame,
}

impl ProbeOutcome {
    /// The record, if the probe succeeded.
    pub fn into_game(self) -> Option<GameRecord> {
        match self {
            ProbeOutcome::Game(record) => Some(record),
            ProbeOutcome::NotAGame => None,
        }
    }

    /// Whether the probe produced a record.
    pub fn is_game(&self) -> bool {
        matches!(self, ProbeOutcome::Game(_))
    }
}
