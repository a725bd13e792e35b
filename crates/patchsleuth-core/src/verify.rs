/// Installation verification — checks a game directory against a manifest.
///
/// `Existence` mode matches the generated verification script: a record is
/// satisfied when `<game_dir>/<path>` exists. `Strict` mode additionally
/// compares the recorded size and, when the manifest carries digests, the
/// content hash.
use crate::hash::{hash_file, is_error_marker};
use crate::model::{FileRecord, Manifest};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifyMode {
    #[default]
    Existence,
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    pub mode: VerifyMode,
}

/// Why a present file failed a strict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    SizeMismatch { expected: u64, actual: u64 },
    HashMismatch,
    HashUnavailable,
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch (expected {expected} bytes, found {actual})")
            }
            Self::HashMismatch => f.write_str("hash mismatch"),
            Self::HashUnavailable => f.write_str("hash unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub reason: MismatchReason,
}

/// Outcome of checking every required record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub verified: Vec<String>,
    pub missing: Vec<String>,
    pub mismatched: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_success(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }

    /// Process exit status: 0 when everything checked out, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Check every required record of `manifest` under `game_dir`.
///
/// Records with `required == false` are ignored.
pub fn verify_installation(
    manifest: &Manifest,
    game_dir: &Path,
    options: VerifyOptions,
) -> VerifyReport {
    let mut report = VerifyReport::default();

    for record in manifest.files.iter().filter(|r| r.required) {
        let target = game_dir.join(&record.path);
        let metadata = match fs::metadata(&target) {
            Ok(m) => m,
            Err(err) => {
                debug!("Missing {}: {err}", target.display());
                report.missing.push(record.path.clone());
                continue;
            }
        };

        if options.mode == VerifyMode::Strict {
            if let Some(reason) = strict_check(manifest, record, &target, metadata.len()) {
                report.mismatched.push(Mismatch {
                    path: record.path.clone(),
                    reason,
                });
                continue;
            }
        }

        report.verified.push(record.path.clone());
    }

    report
}

fn strict_check(
    manifest: &Manifest,
    record: &FileRecord,
    target: &Path,
    actual_size: u64,
) -> Option<MismatchReason> {
    if actual_size != record.size {
        return Some(MismatchReason::SizeMismatch {
            expected: record.size,
            actual: actual_size,
        });
    }

    let expected = record.hash.as_deref().filter(|h| !is_error_marker(h))?;
    // Manifests without a recorded algorithm carry MD5 digests.
    let algorithm = manifest.metadata.hash_algorithm.unwrap_or_default();

    match hash_file(target, algorithm) {
        Ok(actual) if actual.eq_ignore_ascii_case(expected) => None,
        Ok(_) => Some(MismatchReason::HashMismatch),
        Err(err) => {
            debug!("Could not hash {}: {err}", target.display());
            Some(MismatchReason::HashUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use tempfile::TempDir;

    fn manifest_for(files: Vec<FileRecord>, algorithm: Option<HashAlgorithm>) -> Manifest {
        Manifest::build(Path::new("/patch"), files, algorithm)
    }

    fn install(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn reports_missing_file_and_failure_exit_code() {
        let game = TempDir::new().unwrap();
        install(game.path(), "assets/lang/en.json", b"{}");

        let manifest = manifest_for(
            vec![
                FileRecord::from_relative_path("assets/lang/en.json", 2),
                FileRecord::from_relative_path("assets/sounds/click.ogg", 200),
            ],
            None,
        );

        let report = verify_installation(&manifest, game.path(), VerifyOptions::default());
        assert_eq!(report.verified, vec!["assets/lang/en.json".to_string()]);
        assert_eq!(report.missing, vec!["assets/sounds/click.ogg".to_string()]);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn complete_installation_succeeds() {
        let game = TempDir::new().unwrap();
        install(game.path(), "a.txt", b"abc");

        let manifest = manifest_for(vec![FileRecord::from_relative_path("a.txt", 3)], None);
        let report = verify_installation(&manifest, game.path(), VerifyOptions::default());
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    /// Existence mode ignores size differences; strict mode flags them.
    #[test]
    fn strict_mode_checks_size() {
        let game = TempDir::new().unwrap();
        install(game.path(), "a.txt", b"abcdef");
        let manifest = manifest_for(vec![FileRecord::from_relative_path("a.txt", 3)], None);

        let lenient = verify_installation(&manifest, game.path(), VerifyOptions::default());
        assert!(lenient.is_success());

        let strict = verify_installation(
            &manifest,
            game.path(),
            VerifyOptions {
                mode: VerifyMode::Strict,
            },
        );
        assert_eq!(
            strict.mismatched[0].reason,
            MismatchReason::SizeMismatch {
                expected: 3,
                actual: 6
            }
        );
    }

    #[test]
    fn strict_mode_checks_hash_case_insensitively() {
        let game = TempDir::new().unwrap();
        install(game.path(), "a.txt", b"hello world");

        let mut good = FileRecord::from_relative_path("a.txt", 11);
        good.hash = Some("5EB63BBBE01EEED093CB22BB8F5ACDC3".to_string());
        let strict = VerifyOptions {
            mode: VerifyMode::Strict,
        };

        let manifest = manifest_for(vec![good.clone()], Some(HashAlgorithm::Md5));
        assert!(verify_installation(&manifest, game.path(), strict).is_success());

        let mut bad = good;
        bad.hash = Some("00000000000000000000000000000000".to_string());
        let manifest = manifest_for(vec![bad], Some(HashAlgorithm::Md5));
        let report = verify_installation(&manifest, game.path(), strict);
        assert_eq!(report.mismatched[0].reason, MismatchReason::HashMismatch);
    }

    /// A hash that failed at scan time cannot be compared and is not a mismatch.
    #[test]
    fn error_marker_hash_is_not_compared() {
        let game = TempDir::new().unwrap();
        install(game.path(), "a.txt", b"abc");

        let mut record = FileRecord::from_relative_path("a.txt", 3);
        record.hash = Some("error: Permission denied (os error 13)".to_string());
        let manifest = manifest_for(vec![record], Some(HashAlgorithm::Md5));

        let report = verify_installation(
            &manifest,
            game.path(),
            VerifyOptions {
                mode: VerifyMode::Strict,
            },
        );
        assert!(report.is_success());
    }

    #[test]
    fn optional_records_are_ignored() {
        let game = TempDir::new().unwrap();
        let mut record = FileRecord::from_relative_path("optional/extra.png", 10);
        record.required = false;
        let manifest = manifest_for(vec![record], None);

        let report = verify_installation(&manifest, game.path(), VerifyOptions::default());
        assert!(report.is_success());
        assert!(report.verified.is_empty());
    }

    /// Digests in a manifest that names no algorithm are compared as MD5.
    #[test]
    fn strict_mode_assumes_md5_without_algorithm() {
        let game = TempDir::new().unwrap();
        install(game.path(), "a.txt", b"hello world");
        let strict = VerifyOptions {
            mode: VerifyMode::Strict,
        };

        let mut good = FileRecord::from_relative_path("a.txt", 11);
        good.hash = Some("5eb63bbbe01eeed093cb22bb8f5acdc3".to_string());
        let manifest = manifest_for(vec![good.clone()], None);
        assert!(verify_installation(&manifest, game.path(), strict).is_success());

        let mut bad = good;
        bad.hash = Some("ffffffffffffffffffffffffffffffff".to_string());
        let manifest = manifest_for(vec![bad], None);
        let report = verify_installation(&manifest, game.path(), strict);
        assert_eq!(report.mismatched[0].reason, MismatchReason::HashMismatch);
        assert_eq!(report.exit_code(), 1);
    }
}
