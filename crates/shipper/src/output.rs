//! Console commentary.
//!
//! Every tool reports progress through a [`Console`]: one bracketed label per
//! line, coloured when writing to a terminal.

use console::{style, Color, Term};
use std::io::{self, Write};

pub struct Console<W: Write> {
    out: W,
    styled: bool,
}

impl Console<io::Stdout> {
    /// Stdout, styled when it is a terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Term::stdout().is_term())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `=== msg ===`
    pub fn banner(&mut self, msg: &str) {
        let line = format!("=== {msg} ===");
        let line = if self.styled {
            style(line).bold().to_string()
        } else {
            line
        };
        let _ = writeln!(self.out, "{line}");
    }

    pub fn step(&mut self, msg: &str) {
        self.labeled("[build]", Color::Cyan, msg);
    }

    pub fn success(&mut self, msg: &str) {
        self.labeled("[ok]", Color::Green, msg);
    }

    pub fn fail(&mut self, msg: &str) {
        self.labeled("[fail]", Color::Red, msg);
    }

    pub fn warn(&mut self, msg: &str) {
        self.labeled("[warn]", Color::Yellow, msg);
    }

    pub fn note(&mut self, msg: &str) {
        self.labeled("[note]", Color::Blue, msg);
    }

    /// Indented, unlabeled line.
    pub fn detail(&mut self, msg: &str) {
        let line = if self.styled {
            style(format!("  {msg}")).dim().to_string()
        } else {
            format!("  {msg}")
        };
        let _ = writeln!(self.out, "{line}");
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    fn labeled(&mut self, label: &str, color: Color, msg: &str) {
        let label = if self.styled {
            style(label).bold().fg(color).to_string()
        } else {
            label.to_string()
        };
        let _ = writeln!(self.out, "{label} {msg}");
    }
}

#[cfg(test)]
pub(crate) fn captured() -> Console<Vec<u8>> {
    Console::new(Vec::new(), false)
}
