/// Manifest statistics — counts by type, extension, and top-level directory.
///
/// Derived purely from the sorted record list and recomputed on every
/// manifest build; nothing here is updated incrementally.
use crate::analysis::FileType;
use crate::model::FileRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count tallies written to the manifest's `statistics` object.
///
/// Consumers must not rely on key order; `BTreeMap` only keeps the
/// serialized output stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub by_type: BTreeMap<FileType, u64>,
    pub by_extension: BTreeMap<String, u64>,
    pub by_directory: BTreeMap<String, u64>,
}

/// Tally `records` into the three independent counters.
///
/// - `by_type` counts every record.
/// - `by_extension` skips records without an extension.
/// - `by_directory` is keyed by the first path segment and skips files that
///   sit directly in the scan root.
pub fn generate_statistics(records: &[FileRecord]) -> Statistics {
    let mut stats = Statistics::default();

    for record in records {
        *stats.by_type.entry(record.file_type).or_insert(0) += 1;

        if !record.extension.is_empty() {
            *stats
                .by_extension
                .entry(record.extension.clone())
                .or_insert(0) += 1;
        }

        if let Some((top, _rest)) = record.path.split_once('/') {
            *stats.by_directory.entry(top.to_string()).or_insert(0) += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord::from_relative_path(path, size)
    }

    #[test]
    fn counts_types_extensions_and_directories() {
        let records = vec![
            record("assets/lang/en.json", 50),
            record("assets/sounds/click.ogg", 200),
            record("config/mod.toml", 10),
            record("config/readme", 5),
        ];

        let stats = generate_statistics(&records);

        assert_eq!(stats.by_type.get(&FileType::Json), Some(&1));
        assert_eq!(stats.by_type.get(&FileType::Audio), Some(&1));
        assert_eq!(stats.by_type.get(&FileType::Toml), Some(&1));
        assert_eq!(stats.by_type.get(&FileType::NoExt), Some(&1));

        assert_eq!(stats.by_extension.len(), 3, "no-extension file is not tallied");
        assert_eq!(stats.by_extension.get("ogg"), Some(&1));

        assert_eq!(stats.by_directory.get("assets"), Some(&2));
        assert_eq!(stats.by_directory.get("config"), Some(&2));
    }

    /// Files directly in the scan root contribute to no directory bucket.
    #[test]
    fn root_level_files_have_no_directory() {
        let records = vec![record("pack.mcmeta", 10), record("logo.png", 20)];
        let stats = generate_statistics(&records);

        assert!(stats.by_directory.is_empty());
        assert_eq!(stats.by_type.values().sum::<u64>(), 2);
    }

    #[test]
    fn empty_record_list_yields_empty_statistics() {
        assert_eq!(generate_statistics(&[]), Statistics::default());
    }

    #[test]
    fn serializes_type_keys_as_labels() {
        let stats = generate_statistics(&[record("readme", 1)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_type"]["no_ext"], 1);
    }
}
