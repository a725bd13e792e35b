/// Error types for scanning, manifest I/O, and per-file extraction.
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scan errors. Anything not listed here is handled per file.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to resolve {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read metadata for a single discovered file.
///
/// Never escapes a scan: the scanner turns it into a
/// [`FileOutcome::Skipped`](crate::scanner::FileOutcome::Skipped) entry.
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", .path.display())]
pub struct ExtractError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors writing or reading a manifest document.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}
