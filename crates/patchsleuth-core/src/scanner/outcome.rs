/// Per-file scan outcomes.
///
/// Every file the walker reports becomes exactly one outcome, so a single
/// unreadable file costs one record rather than the whole scan.
use crate::model::FileRecord;
use std::path::PathBuf;

/// A file that was discovered but could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// `None` when the walker could not attribute the error to a path.
    pub path: Option<PathBuf>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Recorded(FileRecord),
    Skipped(SkippedFile),
}
