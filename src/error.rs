//! Error types for conversion and packaging.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a document or writing the
/// package. The transformation stages themselves are total over arbitrary
/// text; only I/O and archive plumbing can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to write {}: {}", .path.display(), .source)]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
