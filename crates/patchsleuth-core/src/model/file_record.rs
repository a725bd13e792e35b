/// A single file entry in the manifest, and the extractor that builds one
/// from a file discovered on disk.
use crate::analysis::{categorise_extension, FileType};
use crate::error::ExtractError;
use crate::hash::{hash_or_marker, HashAlgorithm};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Component, Path};

/// Metadata for one scanned file.
///
/// Created once per discovered file and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, always `/`-separated.
    pub path: String,

    #[serde(rename = "type")]
    pub file_type: FileType,

    /// Lowercase extension without the leading dot; `""` when there is none.
    pub extension: String,

    /// Size in bytes at scan time.
    pub size: u64,

    /// Always `true` for scanned entries. Hand-edited manifests may clear it
    /// to make the verifier ignore an entry.
    #[serde(default = "default_required")]
    pub required: bool,

    /// Lowercase hex digest, or an `error: ...` marker if hashing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

fn default_required() -> bool {
    true
}

impl FileRecord {
    /// Build an unhashed record from an already-normalised relative path.
    pub fn from_relative_path(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let extension = extension_of(Path::new(&path));
        Self {
            file_type: categorise_extension(&extension),
            extension,
            path,
            size,
            required: true,
            hash: None,
        }
    }
}

/// Build the record for `file`, a path beneath `root`.
///
/// The size is read from the filesystem now. When `hash` is set the content
/// is digested; a hashing failure is stored as an error marker and does not
/// fail the record. Only a metadata failure (file vanished, permission
/// denied on stat) is returned as an error.
pub fn extract_file_info(
    file: &Path,
    root: &Path,
    hash: Option<HashAlgorithm>,
) -> Result<FileRecord, ExtractError> {
    let relative = file.strip_prefix(root).map_err(|_| ExtractError {
        path: file.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path is outside the scan root"),
    })?;

    let metadata = std::fs::metadata(file).map_err(|source| ExtractError {
        path: file.to_path_buf(),
        source,
    })?;

    let mut record = FileRecord::from_relative_path(normalise_relative(relative), metadata.len());
    record.hash = hash.map(|algorithm| hash_or_marker(file, algorithm));
    Ok(record)
}

/// Join the normal components of `relative` with `/` regardless of platform.
fn normalise_relative(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
