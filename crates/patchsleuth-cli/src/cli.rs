//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use patchsleuth_core::model::DEFAULT_MANIFEST_FILE;
use patchsleuth_core::HashAlgorithm;
use std::path::PathBuf;

use crate::script::DEFAULT_SCRIPT_FILE;

/// patchsleuth - content patch manifest generator and installation checker
#[derive(Debug, Parser)]
#[command(name = "patchsleuth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a content patch into a JSON manifest and verify installations against it")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a patch directory and write its manifest
    Scan(ScanArgs),

    /// Check a game directory against a manifest
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Patch directory to scan
    pub directory: PathBuf,

    /// Manifest file to write
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST_FILE)]
    pub output: PathBuf,

    /// Record a content hash for every file
    #[arg(long)]
    pub hash: bool,

    /// Hash algorithm (md5, sha256, blake3); implies --hash
    #[arg(long, value_name = "ALG")]
    pub hash_algorithm: Option<HashAlgorithm>,

    /// File/directory patterns to exclude, replacing the defaults
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Also write a standalone verification script
    #[arg(long)]
    pub verify_script: bool,

    /// Where to write the verification script
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SCRIPT_FILE)]
    pub script_output: PathBuf,
}

impl ScanArgs {
    /// Algorithm to hash with, or `None` when hashing is off.
    pub fn requested_hash(&self) -> Option<HashAlgorithm> {
        match (self.hash, self.hash_algorithm) {
            (_, Some(algorithm)) => Some(algorithm),
            (true, None) => Some(HashAlgorithm::default()),
            (false, None) => None,
        }
    }
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Manifest produced by `scan`
    pub manifest: PathBuf,

    /// Game directory the patch was installed into
    pub game_dir: PathBuf,

    /// Also compare file sizes and content hashes
    #[arg(long)]
    pub strict: bool,
}
