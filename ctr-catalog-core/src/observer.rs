//! Structured diagnostics for probe runs.
//!
//! The probe never prints. Callers that want to see why files were accepted
//! or rejected inject an observer; the default observer discards everything,
//! which is the right behavior for bulk directory scans where most files are
//! not images at all.

/// Why a probed file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A required header region runs past end-of-file.
    Truncated,
    /// No "NCSD" marker at the partition-table offset.
    MissingNcsdMagic,
    /// The primary partition offset points outside the file.
    PartitionOutOfRange,
    /// The program id field holds non-ASCII bytes.
    InvalidProgramId,
    /// The ExeFS offset field points before the start of the file.
    ExeFsOutOfRange,
    /// The file table has no "icon" entry.
    MissingIconEntry,
    /// No "SMDH" marker at the icon entry's offset.
    MissingSmdhMagic,
}

impl SkipReason {
    /// Human-readable description for diagnostics.
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::Truncated => "required header region runs past end of file",
            SkipReason::MissingNcsdMagic => "no NCSD partition table",
            SkipReason::PartitionOutOfRange => "content partition offset is out of range",
            SkipReason::InvalidProgramId => "program id is not ASCII",
            SkipReason::ExeFsOutOfRange => "file table offset is out of range",
            SkipReason::MissingIconEntry => "file table has no icon entry",
            SkipReason::MissingSmdhMagic => "icon entry is not an SMDH block",
        }
    }
}

/// Events emitted while a probe walks the container chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent<'a> {
    /// The primary content partition was located.
    PartitionLocated {
        /// Absolute byte offset of the partition.
        offset: u64,
        /// Partition size in bytes.
        size: u64,
    },
    /// A named entry was found in the embedded file table.
    FileEntry {
        name: &'a str,
        /// Absolute byte offset of the entry's data.
        offset: u64,
        /// Entry size in bytes.
        size: u32,
    },
    /// The file failed a structural gate and will be skipped.
    Rejected(SkipReason),
}

/// Receives [`ProbeEvent`]s during a probe.
pub trait ProbeObserver {
    fn on_event(&self, event: ProbeEvent<'_>);
}

/// Observer that discards all events.
#[derive(Debug, Default)]
pub struct NullObserver;

impl ProbeObserver for NullObserver {
    fn on_event(&self, _event: ProbeEvent<'_>) {}
}
