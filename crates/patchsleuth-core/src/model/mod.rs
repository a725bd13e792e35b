/// Data model for PatchSleuth manifests.
///
/// Re-exports the per-file record, the manifest document, and supporting types.
pub mod file_record;
pub mod manifest;
pub mod size;

pub use file_record::{extract_file_info, FileRecord};
pub use manifest::{Manifest, Metadata, Settings, DEFAULT_MANIFEST_FILE};
