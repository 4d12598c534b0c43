//! Error types for envbake-copy.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which side of a copy failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyErrorKind {
    /// The source root or one of its entries is missing or cannot be read.
    SourceUnreadable,
    /// A destination directory or file cannot be created.
    DestinationWriteFailed,
    /// Reading or writing failed after both ends were opened.
    IoFailure,
}

impl fmt::Display for CopyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyErrorKind::SourceUnreadable => write!(f, "source unreadable"),
            CopyErrorKind::DestinationWriteFailed => write!(f, "destination write failed"),
            CopyErrorKind::IoFailure => write!(f, "I/O failure"),
        }
    }
}

/// Terminal failure of one destination's copy.
#[derive(Debug, Error)]
#[error("{kind} at {path}: {source}")]
pub struct CopyError {
    pub kind: CopyErrorKind,
    /// Offending source or destination path.
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl CopyError {
    pub fn new(kind: CopyErrorKind, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            kind,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> CopyErrorKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn source_err(path: impl Into<PathBuf>, source: std::io::Error) -> CopyError {
    CopyError::new(CopyErrorKind::SourceUnreadable, path, source)
}

pub(crate) fn dest_err(path: impl Into<PathBuf>, source: std::io::Error) -> CopyError {
    CopyError::new(CopyErrorKind::DestinationWriteFailed, path, source)
}

pub(crate) fn io_failure(path: impl Into<PathBuf>, source: std::io::Error) -> CopyError {
    CopyError::new(CopyErrorKind::IoFailure, path, source)
}
