//! Error types for schematic and emblem codecs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with schematic and paint files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] acfa_common::Error),

    /// A required file does not exist.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A file is shorter than its header says it should be.
    #[error("truncated {what}: needed {needed} bytes, file has {actual}")]
    TruncatedFile {
        what: &'static str,
        needed: usize,
        actual: usize,
    },

    /// A sub-block replacement has the wrong size.
    #[error("invalid {region} size: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        region: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A fixed-size input has the wrong length.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An input length is not a multiple of its record stride.
    #[error("invalid {what} length: {actual} is not a multiple of {stride}")]
    MisalignedLength {
        what: &'static str,
        stride: usize,
        actual: usize,
    },

    /// A caller-supplied parameter is outside its documented bound.
    #[error("{what} out of range: got {value}, expected {expected}")]
    OutOfRange {
        what: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The container has no room for another schematic.
    #[error("not enough space to insert schematic: slot ends at {required:#x}, file is {available:#x} bytes")]
    ContainerFull { required: usize, available: usize },

    /// The schematic count byte cannot be incremented any further.
    #[error("schematic count is already {0}, cannot add another")]
    SlotCountOverflow(u8),

    /// Every emblem slot in PAINT.DAT is occupied.
    #[error("no empty emblem slot left in PAINT.DAT")]
    NoFreeEmblemSlot,

    /// PAINT.DAT is too short to hold every emblem slot.
    #[error("PAINT.DAT is too short: slot {slot} needs {needed} bytes, file has {actual}")]
    PaintTooShort {
        slot: usize,
        needed: usize,
        actual: usize,
    },

    /// A backup could not be created, so the write was not attempted.
    #[error("failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Map a read failure on `path` to [`Error::MissingFile`] when the file is absent.
    pub(crate) fn from_read(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::MissingFile(path.to_path_buf())
        } else {
            Error::Io(err)
        }
    }

    /// Whether this error reports a lack of space (container or emblem slots).
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Error::ContainerFull { .. }
                | Error::SlotCountOverflow(_)
                | Error::NoFreeEmblemSlot
                | Error::PaintTooShort { .. }
        )
    }
}

/// Result type for schematic operations.
pub type Result<T> = std::result::Result<T, Error>;
