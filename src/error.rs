use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures surfaced by dataset loading and pseudo-experiment orchestration.
///
/// The crate performs no local recovery or retry: every failure propagates to
/// the immediate caller unchanged, and a failed load never installs a partial
/// partition.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required file or directory does not exist.
    #[error("missing input file: {path}")]
    MissingFile { path: PathBuf },

    /// A file exists but could not be parsed into its expected shape.
    #[error("malformed data in {path}: {reason}")]
    MalformedData { path: PathBuf, reason: String },

    /// An operation was invoked against state that does not satisfy its
    /// documented precondition.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
}

impl DataError {
    pub(crate) fn missing(path: &Path) -> Self {
        DataError::MissingFile {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        DataError::MalformedData {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
