//! Cross-compile the game for every configured target into `bin/`.
//!
//! Takes no arguments. Individual target failures are reported and do not
//! change the exit status; only an unusable output directory does.

use anyhow::{Context, Result};
use clap::Parser;
use shipper::output::Console;
use shipper::{BuildConfig, GoToolchain};

#[derive(Parser)]
#[command(
    name = "build-all",
    version,
    about = "Cross-compile the game for Windows, Linux, macOS and the browser"
)]
struct Cli {}

fn main() -> Result<()> {
    let Cli {} = Cli::parse();

    let work_dir = std::env::current_dir().context("Reading current directory")?;
    let mut console = Console::stdout();

    shipper::run(
        &BuildConfig::default(),
        &GoToolchain::default(),
        &work_dir,
        &mut console,
    )?;

    Ok(())
}
