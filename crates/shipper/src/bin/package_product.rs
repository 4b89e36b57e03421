//! Assemble the distributable release folder.

use anyhow::{Context, Result};
use clap::Parser;
use shipper::output::Console;
use shipper::package::{self, ReleaseManifest};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "package-product",
    version,
    about = "Assemble mpm-release/MyProjectManager from the project tree"
)]
struct Cli {
    /// Project root (defaults to the current directory)
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Reading current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Resolving {}", root.display()))?;

    let manifest = ReleaseManifest::load_or_default(&root)?;
    let mut console = Console::stdout();
    package::package(&root, &manifest, &mut console)?;

    Ok(())
}
