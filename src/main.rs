//! PatchSleuth — content patch manifest generator and installation checker.
//!
//! Thin binary entry point. All logic lives in the `patchsleuth-core`
//! and `patchsleuth-cli` crates.

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = patchsleuth_cli::Cli::parse();

    // Initialise structured logging. RUST_LOG wins over --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    tracing::debug!("PatchSleuth starting");

    let code = patchsleuth_cli::run(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
