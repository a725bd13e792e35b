/// Scanner module — turns a directory tree into a sorted list of file records.
///
/// A scan is a single sequential pass:
/// [`walker`] enumerates files (pruning excluded directories),
/// [`extract_file_info`] builds one record per file, and every file ends up
/// as one [`FileOutcome`]. Only a missing root aborts the scan.
pub mod outcome;
pub mod walker;

pub use outcome::{FileOutcome, SkippedFile};
pub use walker::{walk_files, Exclusions, WalkItem, DEFAULT_EXCLUDES};

use crate::error::ScanError;
use crate::hash::HashAlgorithm;
use crate::model::{extract_file_info, FileRecord, Manifest};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Options for [`scan`].
///
/// `ScanOptions::default()` is the full scan with the default exclusion set;
/// [`ScanOptions::unfiltered`] walks everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Exclusion patterns; see [`Exclusions`] for matching rules.
    pub exclude: Vec<String>,
    /// Digest algorithm, or `None` to skip hashing.
    pub hash: Option<HashAlgorithm>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            hash: None,
        }
    }
}

impl ScanOptions {
    /// No exclusions, no hashing.
    pub fn unfiltered() -> Self {
        Self {
            exclude: Vec::new(),
            hash: None,
        }
    }

    pub fn with_hash(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash = Some(algorithm);
        self
    }

    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Absolute path of the scanned root.
    pub source_directory: PathBuf,
    /// Records sorted by path, byte-wise ascending.
    pub records: Vec<FileRecord>,
    /// Files that were discovered but could not be recorded.
    pub skipped: Vec<SkippedFile>,
    pub hash_algorithm: Option<HashAlgorithm>,
    pub duration: Duration,
}

impl ScanReport {
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Assemble the manifest for this scan, stamped with the current time.
    pub fn into_manifest(self) -> Manifest {
        Manifest::build(&self.source_directory, self.records, self.hash_algorithm)
    }
}

/// Scan `root` and return every recorded file plus the skips.
///
/// Fails only if `root` does not exist; every per-file problem is logged and
/// collected in [`ScanReport::skipped`].
pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanReport, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    let source_directory = std::path::absolute(root).map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let start = Instant::now();
    let exclusions = Exclusions::new(options.exclude.iter().cloned());
    info!("Starting scan of {}", source_directory.display());
    debug!("Exclusion patterns: {:?}", exclusions.patterns());

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for item in walk_files(&source_directory, &exclusions) {
        match process_item(item, &source_directory, options.hash) {
            FileOutcome::Recorded(record) => records.push(record),
            FileOutcome::Skipped(skip) => {
                match &skip.path {
                    Some(path) => warn!("Skipping {}: {}", path.display(), skip.message),
                    None => warn!("Skipping unreadable entry: {}", skip.message),
                }
                skipped.push(skip);
            }
        }
    }

    // Walk order is not part of the output contract; path order is.
    records.sort_by(|a, b| a.path.cmp(&b.path));

    let duration = start.elapsed();
    info!(
        "Scan complete: {} files recorded, {} skipped in {duration:?}",
        records.len(),
        skipped.len()
    );

    Ok(ScanReport {
        source_directory,
        records,
        skipped,
        hash_algorithm: options.hash,
        duration,
    })
}

/// Turn one walk item into its outcome.
fn process_item(item: WalkItem, root: &Path, hash: Option<HashAlgorithm>) -> FileOutcome {
    match item {
        WalkItem::File(path) => match extract_file_info(&path, root, hash) {
            Ok(record) => FileOutcome::Recorded(record),
            Err(err) => FileOutcome::Skipped(SkippedFile {
                path: Some(err.path),
                message: err.source.to_string(),
            }),
        },
        WalkItem::Error { path, message } => FileOutcome::Skipped(SkippedFile { path, message }),
    }
}
