/// PatchSleuth Core — scanning, manifest generation, and verification.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, in-game
/// launcher hooks, CI checks).
///
/// # Modules
///
/// - [`model`] — File records, the manifest document, and size formatting.
/// - [`scanner`] — Sequential tree walk with exclusion pruning and per-file outcomes.
/// - [`analysis`] — Extension classification and manifest statistics.
/// - [`hash`] — Streaming content digests.
/// - [`verify`] — Checks an installation directory against a manifest.
pub mod analysis;
pub mod error;
pub mod hash;
pub mod model;
pub mod scanner;
pub mod verify;

pub use error::{ExtractError, ManifestError, ScanError};
pub use hash::HashAlgorithm;
pub use model::{FileRecord, Manifest};
pub use scanner::{scan, ScanOptions, ScanReport};
