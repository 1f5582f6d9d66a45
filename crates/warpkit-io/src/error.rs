//! Error types for transform persistence.

use thiserror::Error;

/// Errors raised while reading or writing transform files.
///
/// Messages never include the file path; callers add it as context when
/// they want it shown.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported transform file version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(transparent)]
    Core(#[from] warpkit_core::Error),
}

/// Result type for warpkit-io operations.
pub type Result<T> = std::result::Result<T, IoError>;
