//! Icon/metadata block decoding.
//!
//! The "icon" file-table entry holds an SMDH block: a magic marker, a short
//! header, 12 localized title records, and icon bitmaps (which this crate
//! never reads). Title fields are fixed-width UTF-16LE, NUL-padded.

use crate::layout::{
    LONG_TITLE_LEN, PUBLISHER_LEN, SHORT_TITLE_LEN, SMDH_MAGIC, SMDH_TITLE_OFFSET,
    TITLE_RECORD_COUNT, TITLE_RECORD_SIZE,
};
use crate::util::{read_at, utf16le_lossy};
use crate::{ProbeError, ReadSeek};

/// Locale order of the 12 title records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleLanguage {
    Japanese,
    English,
    French,
    German,
    Italian,
    Spanish,
    SimplifiedChinese,
    Korean,
    Dutch,
    Portuguese,
    Russian,
    TraditionalChinese,
}

impl TitleLanguage {
    /// All record slots in on-disk order.
    pub const ALL: [TitleLanguage; TITLE_RECORD_COUNT] = [
        TitleLanguage::Japanese,
        TitleLanguage::English,
        TitleLanguage::French,
        TitleLanguage::German,
        TitleLanguage::Italian,
        TitleLanguage::Spanish,
        TitleLanguage::SimplifiedChinese,
        TitleLanguage::Korean,
        TitleLanguage::Dutch,
        TitleLanguage::Portuguese,
        TitleLanguage::Russian,
        TitleLanguage::TraditionalChinese,
    ];

    /// Index of this language's record in the title table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One localized title record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    pub short_title: String,
    pub long_title: String,
    pub publisher: String,
}

/// Result of decoding the title table.
#[derive(Debug)]
pub enum TitleTable {
    /// Magic matched and all 12 records were read.
    Decoded(Vec<TitleRecord>),
    /// No SMDH marker at the given offset.
    BadMagic,
    /// The block runs past end-of-file.
    Truncated,
}

/// Read the title table of the SMDH block at `offset`.
pub fn read_titles(reader: &mut dyn ReadSeek, offset: u64) -> Result<TitleTable, ProbeError> {
    let mut magic = [0u8; 4];
    if !read_at(reader, offset, &mut magic)? {
        return Ok(TitleTable::BadMagic);
    }
    if magic != SMDH_MAGIC {
        return Ok(TitleTable::BadMagic);
    }

    let mut block = vec![0u8; TITLE_RECORD_COUNT * TITLE_RECORD_SIZE];
    if !read_at(reader, offset + SMDH_TITLE_OFFSET, &mut block)? {
        return Ok(TitleTable::Truncated);
    }

    let records = block.chunks_exact(TITLE_RECORD_SIZE).map(decode_record).collect();
    Ok(TitleTable::Decoded(records))
}

/// Pick the display title from a decoded table.
///
/// The English long title wins when non-empty; otherwise the Japanese one.
/// Shipped images always populate the Japanese record, so both fields empty
/// only occurs on degenerate inputs. Those resolve to an empty string
/// rather than falling back to any of the other ten locales.
pub fn resolve_title(records: &[TitleRecord]) -> String {
    let long_title_at = |language: TitleLanguage| {
        records
            .get(language.index())
            .map(|r| r.long_title.as_str())
            .unwrap_or("")
    };

    let english = long_title_at(TitleLanguage::English);
    if !english.is_empty() {
        return english.to_string();
    }
    long_title_at(TitleLanguage::Japanese).to_string()
}

fn decode_record(raw: &[u8]) -> TitleRecord {
    let long_start = SHORT_TITLE_LEN;
    let publisher_start = SHORT_TITLE_LEN + LONG_TITLE_LEN;

    TitleRecord {
        short_title: utf16le_lossy(&raw[..SHORT_TITLE_LEN]),
        long_title: normalize_long_title(&utf16le_lossy(&raw[long_start..publisher_start])),
        publisher: utf16le_lossy(&raw[publisher_start..publisher_start + PUBLISHER_LEN]),
    }
}

/// Display cleanup for long titles: embedded newlines become spaces, and any
/// run of spaces collapses to one.
fn normalize_long_title(raw: &str) -> String {
    let mut title = raw.replace('\n', " ");
    while title.contains("  ") {
        title = title.replace("  ", " ");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Write `text` as UTF-16LE into `buf` starting at `offset`.
    fn put_utf16(buf: &mut [u8], offset: usize, text: &str) {
        let mut at = offset;
        for unit in text.encode_utf16() {
            buf[at..at + 2].copy_from_slice(&unit.to_le_bytes());
            at += 2;
        }
    }

    /// Build an SMDH block with the given long titles per record index.
    fn make_smdh(long_titles: &[(usize, &str)]) -> Vec<u8> {
        let mut block = vec![0u8; 8 + TITLE_RECORD_COUNT * TITLE_RECORD_SIZE];
        block[..4].copy_from_slice(b"SMDH");
        for &(index, text) in long_titles {
            put_utf16(&mut block, 8 + index * TITLE_RECORD_SIZE + SHORT_TITLE_LEN, text);
        }
        block
    }

    #[test]
    fn test_english_title_preferred() {
        let block = make_smdh(&[(0, "テストゲーム"), (1, "Test Game")]);
        let TitleTable::Decoded(records) =
            read_titles(&mut Cursor::new(block), 0).unwrap()
        else {
            panic!("expected decoded table");
        };
        assert_eq!(records.len(), 12);
        assert_eq!(resolve_title(&records), "Test Game");
    }

    #[test]
    fn test_japanese_fallback_when_english_empty() {
        let block = make_smdh(&[(0, "テストゲーム")]);
        let TitleTable::Decoded(records) =
            read_titles(&mut Cursor::new(block), 0).unwrap()
        else {
            panic!("expected decoded table");
        };
        assert_eq!(resolve_title(&records), "テストゲーム");
    }

    #[test]
    fn test_both_titles_empty_resolves_to_empty_string() {
        // Deliberate passthrough: no fallback to the other ten locales.
        let block = make_smdh(&[(5, "Juego de Prueba")]);
        let TitleTable::Decoded(records) =
            read_titles(&mut Cursor::new(block), 0).unwrap()
        else {
            panic!("expected decoded table");
        };
        assert_eq!(resolve_title(&records), "");
    }

    #[test]
    fn test_newlines_and_double_spaces_normalized() {
        let block = make_smdh(&[(1, "Line One\nLine Two\n\nEnd")]);
        let TitleTable::Decoded(records) =
            read_titles(&mut Cursor::new(block), 0).unwrap()
        else {
            panic!("expected decoded table");
        };
        assert_eq!(records[1].long_title, "Line One Line Two End");
    }

    #[test]
    fn test_bad_magic() {
        let mut block = make_smdh(&[(1, "Test Game")]);
        block[..4].copy_from_slice(b"XXXX");
        assert!(matches!(
            read_titles(&mut Cursor::new(block), 0).unwrap(),
            TitleTable::BadMagic
        ));
    }

    #[test]
    fn test_truncated_block() {
        let mut block = make_smdh(&[(1, "Test Game")]);
        block.truncate(8 + 3 * TITLE_RECORD_SIZE);
        assert!(matches!(
            read_titles(&mut Cursor::new(block), 0).unwrap(),
            TitleTable::Truncated
        ));
    }

    #[test]
    fn test_short_title_and_publisher_decoded() {
        let mut block = make_smdh(&[]);
        put_utf16(&mut block, 8 + TITLE_RECORD_SIZE, "TG"); // record 1 short title
        put_utf16(
            &mut block,
            8 + TITLE_RECORD_SIZE + SHORT_TITLE_LEN + LONG_TITLE_LEN,
            "Example Publisher",
        );
        let TitleTable::Decoded(records) =
            read_titles(&mut Cursor::new(block), 0).unwrap()
        else {
            panic!("expected decoded table");
        };
        assert_eq!(records[1].short_title, "TG");
        assert_eq!(records[1].publisher, "Example Publisher");
    }

    #[test]
    fn test_language_index_order() {
        assert_eq!(TitleLanguage::Japanese.index(), 0);
        assert_eq!(TitleLanguage::English.index(), 1);
        assert_eq!(TitleLanguage::ALL.len(), TITLE_RECORD_COUNT);
    }
}
