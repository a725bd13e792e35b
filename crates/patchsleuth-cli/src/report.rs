/// Console summaries for the `scan` and `verify` commands.
///
/// Each summary is built as a `String` and printed by the command, so the
/// exact wording is testable without capturing stdout.
use patchsleuth_core::model::size::{format_count, format_size};
use patchsleuth_core::model::Manifest;
use patchsleuth_core::scanner::SkippedFile;
use patchsleuth_core::verify::VerifyReport;
use std::path::Path;

/// Maximum number of missing paths listed after a verification.
pub const MAX_LISTED_MISSING: usize = 10;

/// Join summary lines, each terminated by a newline.
fn render(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn scan_summary(output: &Path, manifest: &Manifest) -> String {
    let mut lines = vec![
        format!("\n✓ Wrote manifest: {}", output.display()),
        format!("  - {} files scanned", format_count(manifest.metadata.total_files)),
        format!("  - Total size: {}", format_size(manifest.metadata.total_size)),
    ];
    if let Some(algorithm) = manifest.metadata.hash_algorithm {
        lines.push(format!("  - Hash: {algorithm}"));
    }

    lines.push("\nFiles by type:".to_string());
    lines.extend(
        manifest
            .statistics
            .by_type
            .iter()
            .map(|(file_type, count)| format!("  - {file_type}: {count} files")),
    );
    render(lines)
}

pub fn skipped_summary(skipped: &[SkippedFile]) -> String {
    if skipped.is_empty() {
        return String::new();
    }
    let mut lines = vec![format!("\n! {} entries could not be recorded:", skipped.len())];
    lines.extend(skipped.iter().map(|skip| match &skip.path {
        Some(path) => format!("  - {}: {}", path.display(), skip.message),
        None => format!("  - {}", skip.message),
    }));
    render(lines)
}

pub fn verify_summary(report: &VerifyReport) -> String {
    let mut lines = vec![
        "\nVerification result:".to_string(),
        format!("✓ Found: {} files", report.verified.len()),
        format!("✗ Missing: {} files", report.missing.len()),
    ];
    if !report.mismatched.is_empty() {
        lines.push(format!("✗ Mismatched: {} files", report.mismatched.len()));
    }

    if !report.missing.is_empty() {
        lines.push("\nMissing files:".to_string());
        lines.extend(
            report
                .missing
                .iter()
                .take(MAX_LISTED_MISSING)
                .map(|path| format!("  - {path}")),
        );
        if report.missing.len() > MAX_LISTED_MISSING {
            lines.push(format!(
                "  ... and {} more",
                report.missing.len() - MAX_LISTED_MISSING
            ));
        }
    }

    if !report.mismatched.is_empty() {
        lines.push("\nMismatched files:".to_string());
        lines.extend(
            report
                .mismatched
                .iter()
                .map(|mismatch| format!("  - {}: {}", mismatch.path, mismatch.reason)),
        );
    }

    if report.is_success() {
        lines.push("\n✓ All patch files are installed correctly.".to_string());
    }
    render(lines)
}
