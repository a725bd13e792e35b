//! Command dispatch

use anyhow::{Context, Result};
use chrono::Local;
use patchsleuth_core::model::Manifest;
use patchsleuth_core::scanner::{scan, ScanOptions};
use patchsleuth_core::verify::{verify_installation, VerifyMode, VerifyOptions};
use std::fs;
use tracing::info;

use crate::cli::{Cli, Commands, ScanArgs, VerifyArgs};
use crate::{report, script};

/// Run the parsed command and return the process exit status.
pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Scan(args) => run_scan(&args).map(|()| 0),
        Commands::Verify(args) => run_verify(&args),
    }
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    let mut options = ScanOptions::default();
    if let Some(patterns) = &args.exclude {
        options = options.with_exclude(patterns.iter().cloned());
    }
    if let Some(algorithm) = args.requested_hash() {
        options = options.with_hash(algorithm);
    }

    let scan_report = scan(&args.directory, &options)
        .with_context(|| format!("failed to scan {}", args.directory.display()))?;
    print!("{}", report::skipped_summary(&scan_report.skipped));

    let manifest = scan_report.into_manifest();
    manifest
        .write(&args.output)
        .with_context(|| format!("failed to write manifest {}", args.output.display()))?;
    print!("{}", report::scan_summary(&args.output, &manifest));

    if args.verify_script {
        let text = script::render_verification_script(&args.output.to_string_lossy(), Local::now());
        fs::write(&args.script_output, text).with_context(|| {
            format!(
                "failed to write verification script {}",
                args.script_output.display()
            )
        })?;
        println!("✓ Wrote verification script: {}", args.script_output.display());
    }

    Ok(())
}

fn run_verify(args: &VerifyArgs) -> Result<i32> {
    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;

    let options = VerifyOptions {
        mode: if args.strict {
            VerifyMode::Strict
        } else {
            VerifyMode::Existence
        },
    };
    info!(
        "Verifying {} files under {} ({:?})",
        manifest.files.len(),
        args.game_dir.display(),
        options.mode
    );

    let result = verify_installation(&manifest, &args.game_dir, options);
    print!("{}", report::verify_summary(&result));
    Ok(result.exit_code())
}
