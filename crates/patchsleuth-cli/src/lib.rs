/// PatchSleuth CLI — command-line frontend.
///
/// This crate contains argument parsing and console output only. Business
/// logic lives in `patchsleuth-core`.
pub mod cli;
pub mod commands;
pub mod report;
pub mod script;

pub use cli::{Cli, Commands};
pub use commands::run;
