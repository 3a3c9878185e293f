//! Console formatting for janitor reports.

use std::io::{self, Write};

use colored::Colorize;

/// Writes status lines to any sink (stdout in the binary, a buffer in tests).
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a success message.
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "✓".green().bold(), message.green())
    }

    /// Print an info message.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "ℹ".blue().bold(), message)
    }

    /// Print a warning message.
    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "⚠".yellow().bold(), message.yellow())
    }

    /// Print an error message.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "✗".red().bold(), message.red())
    }

    /// Print a list entry.
    pub fn item(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "  {} {}", "-".bright_black(), message)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }
}
