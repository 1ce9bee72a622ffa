//! Container probe: the full decode chain from outer partition table to
//! resolved title.
//!
//! Directory scans feed this probe arbitrary files, so every step is a hard
//! structural gate: a mismatch is a routing decision (skip the file), never
//! an assertion. The fixed offsets involved come from [`crate::layout`]; the
//! container formats carry no schema of their own.

use std::fs::File;
use std::io::SeekFrom;
use std::path::Path;

use crate::exefs::ExeFsDir;
use crate::layout::{
    EXEFS_OFFSET_FIELD, MEDIA_UNIT, NCSD_MAGIC, NCSD_MAGIC_OFFSET, PARTITION_TABLE_OFFSET,
    PROGRAM_ID_LEN, PROGRAM_ID_OFFSET,
};
use crate::observer::{NullObserver, ProbeEvent, ProbeObserver, SkipReason};
use crate::smdh::{self, TitleTable};
use crate::util::{ascii_exact, read_at, read_i32_le};
use crate::{GameRecord, ProbeError, ProbeOutcome, ReadSeek};

/// Name of the file-table entry holding the SMDH block.
const ICON_ENTRY: &str = "icon";

/// Probe a file on disk.
///
/// Failure to open the file is an error; every structural mismatch after
/// that resolves to [`ProbeOutcome::NotAGame`]. The file handle is released
/// on every exit path. A probe reads a few KB at most, regardless of how
/// large the image is.
pub fn probe(path: impl AsRef<Path>) -> Result<ProbeOutcome, ProbeError> {
    probe_with_observer(path, &NullObserver)
}

/// Probe a file on disk, reporting diagnostics to `observer`.
pub fn probe_with_observer(
    path: impl AsRef<Path>,
    observer: &dyn ProbeObserver,
) -> Result<ProbeOutcome, ProbeError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    probe_reader(&mut file, path, observer)
}

/// Probe an already-open reader.
///
/// `source_path` only labels the resulting record; all data comes from
/// `reader`.
pub fn probe_reader(
    reader: &mut dyn ReadSeek,
    source_path: &Path,
    observer: &dyn ProbeObserver,
) -> Result<ProbeOutcome, ProbeError> {
    let file_size = reader.seek(SeekFrom::End(0))?;

    let reject = |reason: SkipReason| -> Result<ProbeOutcome, ProbeError> {
        observer.on_event(ProbeEvent::Rejected(reason));
        Ok(ProbeOutcome::NotAGame)
    };

    // Outer container marker
    let mut magic = [0u8; 4];
    if !read_at(reader, NCSD_MAGIC_OFFSET, &mut magic)? {
        return reject(SkipReason::Truncated);
    }
    if magic != NCSD_MAGIC {
        return reject(SkipReason::MissingNcsdMagic);
    }

    // Primary partition entry: (offset, size) in media units
    let mut entry = [0u8; 8];
    if !read_at(reader, PARTITION_TABLE_OFFSET, &mut entry)? {
        return reject(SkipReason::Truncated);
    }
    let offset_units = read_i32_le(&entry, 0) as i64;
    let size_units = read_i32_le(&entry, 4) as i64;
    let content_offset = offset_units * MEDIA_UNIT;
    if content_offset < 0 || content_offset as u64 >= file_size {
        return reject(SkipReason::PartitionOutOfRange);
    }
    let content_offset = content_offset as u64;
    observer.on_event(ProbeEvent::PartitionLocated {
        offset: content_offset,
        size: (size_units * MEDIA_UNIT).max(0) as u64,
    });

    // Program id
    let mut id_raw = [0u8; PROGRAM_ID_LEN];
    if !read_at(reader, content_offset + PROGRAM_ID_OFFSET, &mut id_raw)? {
        return reject(SkipReason::Truncated);
    }
    let Some(program_id) = ascii_exact(&id_raw) else {
        return reject(SkipReason::InvalidProgramId);
    };

    // ExeFS region: offset field is in media units, relative to the partition
    let mut field = [0u8; 4];
    if !read_at(reader, content_offset + EXEFS_OFFSET_FIELD, &mut field)? {
        return reject(SkipReason::Truncated);
    }
    let exefs_offset = content_offset as i64 + read_i32_le(&field, 0) as i64 * MEDIA_UNIT;
    if exefs_offset < 0 {
        return reject(SkipReason::ExeFsOutOfRange);
    }

    let Some(dir) = ExeFsDir::read(reader, exefs_offset as u64, observer)? else {
        return reject(SkipReason::Truncated);
    };
    let Some(icon_offset) = dir.file_offset(ICON_ENTRY) else {
        return reject(SkipReason::MissingIconEntry);
    };

    // Icon metadata
    let records = match smdh::read_titles(reader, icon_offset)? {
        TitleTable::Decoded(records) => records,
        TitleTable::BadMagic => return reject(SkipReason::MissingSmdhMagic),
        TitleTable::Truncated => return reject(SkipReason::Truncated),
    };

    Ok(ProbeOutcome::Game(GameRecord {
        program_id,
        title: smdh::resolve_title(&records),
        source_path: source_path.to_path_buf(),
    }))
}

#[cfg(test)]
#[path = "tests/probe_tests.rs"]
mod tests;
