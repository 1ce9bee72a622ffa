use thiserror::Error;

/// Unexpected failures while probing a file.
///
/// Structural mismatches are not errors; they resolve to
/// [`ProbeOutcome::NotAGame`](crate::ProbeOutcome::NotAGame). An error here
/// means the file could not be read at all (permission denied, device
/// failure), which callers typically log before moving on to the next file.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// I/O failure opening or reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
