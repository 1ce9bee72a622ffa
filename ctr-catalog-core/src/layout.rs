//! Byte layout of the cartridge container formats.
//!
//! None of these offsets are declared by a schema inside the files; they were
//! established by inspection of real images. Keeping the whole contract in
//! one table keeps it auditable independently of the traversal code.
//! All multi-byte integers are little-endian signed 32-bit unless noted.

/// 1 media unit = 0x200 bytes (512 bytes).
pub(crate) const MEDIA_UNIT: i64 = 0x200;

/// Absolute offset of the outer container marker.
pub(crate) const NCSD_MAGIC_OFFSET: u64 = 0x100;

/// Outer container marker: "NCSD".
pub(crate) const NCSD_MAGIC: [u8; 4] = *b"NCSD";

/// Absolute offset of the first partition-table entry: (i32 offset, i32 size),
/// both in media units. The first entry is the primary content partition.
pub(crate) const PARTITION_TABLE_OFFSET: u64 = 0x120;

/// Offset of the program id field, relative to the content partition.
pub(crate) const PROGRAM_ID_OFFSET: u64 = 0x150;

/// The program id is 10 ASCII bytes.
pub(crate) const PROGRAM_ID_LEN: usize = 10;

/// Offset of the ExeFS region offset field (i32, media units, relative to
/// the content partition), itself relative to the content partition.
pub(crate) const EXEFS_OFFSET_FIELD: u64 = 0x1A0;

/// The ExeFS directory is a fixed table of 10 slots.
pub(crate) const EXEFS_SLOT_COUNT: usize = 10;

/// Each slot: 8-byte NUL-padded name, i32 relative offset, i32 size.
pub(crate) const EXEFS_SLOT_SIZE: usize = 16;
pub(crate) const EXEFS_NAME_LEN: usize = 8;

/// Size of the directory region itself. File data follows it, so slot
/// offsets resolve to `base + slot_offset + EXEFS_HEADER_SIZE`.
pub(crate) const EXEFS_HEADER_SIZE: i64 = 0x200;

/// Icon/metadata block marker: "SMDH".
pub(crate) const SMDH_MAGIC: [u8; 4] = *b"SMDH";

/// Title records start this far into the SMDH block.
pub(crate) const SMDH_TITLE_OFFSET: u64 = 0x8;

/// 12 title records, one per supported locale, in fixed format order.
pub(crate) const TITLE_RECORD_COUNT: usize = 12;

/// Per-record field widths: UTF-16LE, NUL-padded.
pub(crate) const SHORT_TITLE_LEN: usize = 0x80;
pub(crate) const LONG_TITLE_LEN: usize = 0x100;
pub(crate) const PUBLISHER_LEN: usize = 0x80;

/// Total size of one title record.
pub(crate) const TITLE_RECORD_SIZE: usize = SHORT_TITLE_LEN + LONG_TITLE_LEN + PUBLISHER_LEN;
