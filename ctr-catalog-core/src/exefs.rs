//! Embedded file-table decoding.
//!
//! The content partition carries a flat table of up to 10 named files (code,
//! icon, banner, ...). Each slot is 16 bytes: an 8-byte NUL-padded ASCII
//! name, an i32 offset relative to the end of the directory region, and an
//! i32 size. Slots with an empty name are unused, not malformed.

use std::collections::HashMap;

use crate::layout::{EXEFS_HEADER_SIZE, EXEFS_NAME_LEN, EXEFS_SLOT_COUNT, EXEFS_SLOT_SIZE};
use crate::observer::{ProbeEvent, ProbeObserver};
use crate::util::{read_ascii, read_at, read_i32_le};
use crate::{ProbeError, ReadSeek};

/// Decoded file table: entry name to absolute byte offset within the image.
#[derive(Debug, Clone, Default)]
pub struct ExeFsDir {
    entries: HashMap<String, u64>,
}

impl ExeFsDir {
    /// Read the fixed-size directory at `base_offset`.
    ///
    /// Returns `Ok(None)` when the table does not fit inside the file.
    /// Referenced offsets are not bounds-checked here; readers that follow
    /// them perform their own gated reads. The format defines no policy for
    /// duplicate names; this keeps the last slot seen, matching plain map
    /// insertion.
    pub fn read(
        reader: &mut dyn ReadSeek,
        base_offset: u64,
        observer: &dyn ProbeObserver,
    ) -> Result<Option<ExeFsDir>, ProbeError> {
        let mut table = [0u8; EXEFS_SLOT_COUNT * EXEFS_SLOT_SIZE];
        if !read_at(reader, base_offset, &mut table)? {
            return Ok(None);
        }

        let mut entries = HashMap::new();
        for slot in table.chunks_exact(EXEFS_SLOT_SIZE) {
            let name = read_ascii(&slot[..EXEFS_NAME_LEN]);
            if name.is_empty() {
                continue; // unused slot
            }

            let rel_offset = read_i32_le(slot, EXEFS_NAME_LEN) as i64;
            let size = read_i32_le(slot, EXEFS_NAME_LEN + 4);
            let absolute = base_offset as i64 + rel_offset + EXEFS_HEADER_SIZE;
            if absolute < 0 {
                log::debug!("file table entry {name:?} points before start of image, ignoring");
                continue;
            }
            let absolute = absolute as u64;

            observer.on_event(ProbeEvent::FileEntry {
                name: &name,
                offset: absolute,
                size: size as u32,
            });
            entries.insert(name, absolute);
        }

        Ok(Some(ExeFsDir { entries }))
    }

    /// Absolute offset of the named entry, if present.
    pub fn file_offset(&self, name: &str) -> Option<u64> {
        self.entries.get(name).copied()
    }

    /// Number of used slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullObserver;
    use std::io::Cursor;

    /// Build a directory table with the given (name, rel_offset, size) slots.
    fn make_table(slots: &[(&[u8], i32, i32)]) -> Vec<u8> {
        let mut table = vec![0u8; EXEFS_SLOT_COUNT * EXEFS_SLOT_SIZE];
        for (i, (name, offset, size)) in slots.iter().enumerate() {
            let base = i * EXEFS_SLOT_SIZE;
            table[base..base + name.len()].copy_from_slice(name);
            table[base + 8..base + 12].copy_from_slice(&offset.to_le_bytes());
            table[base + 12..base + 16].copy_from_slice(&size.to_le_bytes());
        }
        table
    }

    #[test]
    fn test_reads_entries_and_skips_unused_slots() {
        let table = make_table(&[(b"icon", 0x40, 0x36C0), (b"code", 0x4000, 0x100)]);
        let dir = ExeFsDir::read(&mut Cursor::new(table), 0, &NullObserver)
            .unwrap()
            .unwrap();

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.file_offset("icon"), Some(0x40 + 0x200));
        assert_eq!(dir.file_offset("code"), Some(0x4000 + 0x200));
        assert_eq!(dir.file_offset("banner"), None);
    }

    #[test]
    fn test_offsets_are_relative_to_base_plus_header() {
        let mut image = vec![0u8; 0x1000];
        let table = make_table(&[(b"icon", 0x80, 64)]);
        image[0x600..0x600 + table.len()].copy_from_slice(&table);

        let dir = ExeFsDir::read(&mut Cursor::new(image), 0x600, &NullObserver)
            .unwrap()
            .unwrap();
        assert_eq!(dir.file_offset("icon"), Some(0x600 + 0x80 + 0x200));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let table = make_table(&[(b"icon", 0x100, 8), (b"icon", 0x300, 8)]);
        let dir = ExeFsDir::read(&mut Cursor::new(table), 0, &NullObserver)
            .unwrap()
            .unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.file_offset("icon"), Some(0x300 + 0x200));
    }

    #[test]
    fn test_truncated_table_fails_the_gate() {
        let table = make_table(&[(b"icon", 0, 0)]);
        let short = table[..100].to_vec();
        assert!(
            ExeFsDir::read(&mut Cursor::new(short), 0, &NullObserver)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_entry_before_start_of_image_is_ignored() {
        let table = make_table(&[(b"icon", -0x1000, 8)]);
        let dir = ExeFsDir::read(&mut Cursor::new(table), 0, &NullObserver)
            .unwrap()
            .unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn test_all_slots_empty() {
        let table = make_table(&[]);
        let dir = ExeFsDir::read(&mut Cursor::new(table), 0, &NullObserver)
            .unwrap()
            .unwrap();
        assert!(dir.is_empty());
    }
}
