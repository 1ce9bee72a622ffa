//! Byte and string decoding helpers shared by the container parsers.

use std::io::SeekFrom;

use crate::{ProbeError, ReadSeek};

/// Read a little-endian i32 from a byte slice.
pub(crate) fn read_i32_le(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Read exactly `buf.len()` bytes at `offset`.
///
/// Running past end-of-file is a failed structural gate (`Ok(false)`), not an
/// error; any other I/O failure propagates.
pub(crate) fn read_at(
    reader: &mut dyn ReadSeek,
    offset: u64,
    buf: &mut [u8],
) -> Result<bool, ProbeError> {
    reader.seek(SeekFrom::Start(offset))?;
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Read a NUL-padded ASCII name field.
///
/// Stops at the first NUL and drops non-printable bytes.
pub(crate) fn read_ascii(buf: &[u8]) -> String {
    buf.iter()
        .take_while(|&&b| b != 0)
        .filter(|&&b| (0x20..0x7F).contains(&b))
        .map(|&b| b as char)
        .collect()
}

/// Decode a fixed-width ASCII field verbatim.
///
/// Returns `None` if any byte falls outside the ASCII range; bytes below
/// 0x20 (including NUL padding) are kept as-is.
pub(crate) fn ascii_exact(buf: &[u8]) -> Option<String> {
    if buf.iter().any(|&b| b > 0x7F) {
        return None;
    }
    Some(buf.iter().map(|&b| b as char).collect())
}

/// Decode a NUL-padded UTF-16LE field.
///
/// Invalid code units decode to the replacement character rather than
/// failing the field; trailing NUL padding is trimmed.
pub(crate) fn utf16le_lossy(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}
