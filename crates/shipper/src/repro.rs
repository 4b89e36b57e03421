//! Issue reproduction harness.
//!
//! A reproduction is a closure that exercises the suspected bug:
//! - returns `Ok(())` when the behaviour is correct (bug fixed, exit 0)
//! - returns `Err` or panics (failed `assert!`) when the bug shows (exit 1)
//!
//! Use `anyhow::ensure!` for the checks so the message ends up in the verdict.

use crate::output::Console;
use anyhow::Result;
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed.
    NotReproduced,
    /// The bug showed up, with what went wrong.
    Reproduced(String),
}

impl Verdict {
    pub fn is_reproduced(&self) -> bool {
        matches!(self, Self::Reproduced(_))
    }

    /// 0 when fixed, 1 when reproduced.
    pub fn code(&self) -> u8 {
        match self {
            Self::NotReproduced => 0,
            Self::Reproduced(_) => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Run `reproduce` for `issue` and report the verdict.
pub fn run<W, F>(issue: &str, reproduce: F, console: &mut Console<W>) -> Verdict
where
    W: Write,
    F: FnOnce() -> Result<()>,
{
    console.banner(&format!("Reproducing {issue}"));

    let verdict = match panic::catch_unwind(AssertUnwindSafe(reproduce)) {
        Ok(Ok(())) => Verdict::NotReproduced,
        Ok(Err(e)) => Verdict::Reproduced(format!("{e:#}")),
        Err(payload) => Verdict::Reproduced(panic_message(payload.as_ref())),
    };

    match &verdict {
        Verdict::NotReproduced => {
            console.success("Not reproduced, all checks passed (bug fixed)");
        }
        Verdict::Reproduced(msg) => console.fail(&format!("Reproduced: {msg}")),
    }
    verdict
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
