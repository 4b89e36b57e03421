//! Reproduction template for issue triage.
//!
//! Copy this file, fill in `reproduce_issue`, and run it:
//! - bug present: a check fails (`ensure!`, `assert!`, or an error) -> exit 1
//! - bug fixed: every check passes -> exit 0

use anyhow::Result;
use clap::Parser;
use shipper::output::Console;
use shipper::repro;
use std::process::ExitCode;

const ISSUE: &str = "ISSUE-0000";

#[derive(Parser)]
#[command(name = "reproduce", version, about = "Run the issue reproduction")]
struct Cli {}

/// 1. set up the objects/data the issue needs
/// 2. call the code that misbehaves
/// 3. `ensure!` the expected result
fn reproduce_issue() -> Result<()> {
    Ok(())
}

fn main() -> ExitCode {
    let Cli {} = Cli::parse();

    let mut console = Console::stdout();
    repro::run(ISSUE, reproduce_issue, &mut console).exit_code()
}
