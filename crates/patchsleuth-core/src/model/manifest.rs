/// The manifest document: metadata, statistics, sorted file list, status
/// messages, and checker settings.
///
/// A manifest is generated once and written in full; there is no merge or
/// update path. Regenerating always overwrites the previous file.
use crate::analysis::{generate_statistics, Statistics};
use crate::error::ManifestError;
use crate::hash::HashAlgorithm;
use crate::model::FileRecord;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// File name used when no output path is given.
pub const DEFAULT_MANIFEST_FILE: &str = "localization_checker.json";

/// Shown by the in-game checker when the patch is missing or broken.
/// The `§c` prefix is the game's colour code and is passed through untouched.
pub const FAILURE_MESSAGE: &str = "§c[汉化检查] ✗ 汉化补丁未正确安装，请重新下载并安装！";

/// Success text for a manifest covering `file_count` files.
pub fn success_message(file_count: usize) -> String {
    format!("§a[汉化检查] ✓ 汉化补丁已成功加载！共验证 {file_count} 个文件")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Written as RFC 3339. Offset-free timestamps, as emitted by the older
    /// Python scanner, are read back as local time.
    #[serde(deserialize_with = "deserialize_generated_at")]
    pub generated_at: DateTime<Local>,
    pub total_files: u64,
    pub total_size: u64,
    /// Absolute path of the scanned directory.
    pub source_directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_algorithm: Option<HashAlgorithm>,
}

fn deserialize_generated_at<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&text) {
        return Ok(stamp.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid generated_at timestamp: {text}")))
}

/// Options read by the in-game checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub check_on_startup: bool,
    pub show_detailed_errors: bool,
    pub validate_file_hash: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: Metadata,
    pub statistics: Statistics,
    pub files: Vec<FileRecord>,
    #[serde(rename = "successMessage")]
    pub success_message: String,
    #[serde(rename = "failureMessage")]
    pub failure_message: String,
    pub settings: Settings,
}

impl Manifest {
    /// Assemble a manifest stamped with the current local time.
    pub fn build(
        source_directory: &Path,
        files: Vec<FileRecord>,
        hash_algorithm: Option<HashAlgorithm>,
    ) -> Self {
        Self::build_at(source_directory, files, hash_algorithm, Local::now())
    }

    /// Assemble a manifest with an explicit timestamp.
    ///
    /// `files` is sorted by path here as well, so the output order never
    /// depends on how the caller collected the records.
    pub fn build_at(
        source_directory: &Path,
        mut files: Vec<FileRecord>,
        hash_algorithm: Option<HashAlgorithm>,
        generated_at: DateTime<Local>,
    ) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let statistics = generate_statistics(&files);
        let total_size = files.iter().map(|f| f.size).sum();

        Self {
            metadata: Metadata {
                generated_at,
                total_files: files.len() as u64,
                total_size,
                source_directory: source_directory.to_string_lossy().into_owned(),
                hash_algorithm,
            },
            statistics,
            success_message: success_message(files.len()),
            failure_message: FAILURE_MESSAGE.to_string(),
            settings: Settings {
                check_on_startup: true,
                show_detailed_errors: true,
                validate_file_hash: hash_algorithm.is_some(),
            },
            files,
        }
    }

    /// Pretty-printed JSON, two-space indented, non-ASCII left unescaped.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `path`, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Wrote manifest with {} files to {}", self.files.len(), path.display());
        Ok(())
    }

    /// Read a manifest previously written by [`Manifest::write`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}
