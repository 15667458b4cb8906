//! Colored terminal output for the CLI.
//!
//! Status lines go to stdout and are suppressed in quiet mode; errors always
//! go to stderr. Requested reports use [`OutputManager::println`], which
//! ignores quiet mode.

use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing messages
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Whether status output is suppressed
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a line regardless of quiet mode
    pub fn println(&self, message: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")
    }

    /// Print success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.status(&format!("{} {}", "✓".green().bold(), message))
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut err = io::stderr().lock();
        writeln!(err, "{} {}", "⚠".yellow().bold(), message.yellow())
    }

    /// Print error message
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "{} {}", "✗".red().bold(), message.red())
    }

    /// Print section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        let rule = "-".repeat(title.chars().count());
        self.status(&format!("\n{}\n{}", title.cyan().bold(), rule.cyan()))
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.status(&format!("  {message}"))
    }

    fn status(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.println(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_flag_is_kept() {
        assert!(OutputManager::new(true).is_quiet());
        assert!(!OutputManager::new(false).is_quiet());
    }

    #[test]
    fn quiet_suppresses_status_lines() {
        let output = OutputManager::new(true);
        output.success("done").unwrap();
        output.warn("careful").unwrap();
        output.section("Icons").unwrap();
    }
}
