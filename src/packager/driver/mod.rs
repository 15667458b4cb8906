//! Brand packaging entry point.
//!
//! The single CLI argument selects a [`Mode`]; [`BrandPackager`] runs it. Every
//! mode that changes the brand runs fabrication before the platform rebuild.

mod orchestrator;

pub use orchestrator::{BrandContext, BrandPackager};

use crate::packager::registry::BrandPointer;
use std::fmt;

/// Argument that primes a project with the default brand.
pub const PRIME_SENTINEL: &str = "-";

/// Argument that redoes processing for the current brand.
pub const REFRESH_SENTINEL: &str = "!";

/// Operation selected from the brand argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Show the current brand and the available ones.
    Report,
    /// Establish the default brand unless one is already current.
    Prime,
    /// Redo establish, fabrication and rebuild for the current brand.
    Refresh,
    /// Make the named brand current.
    Switch(String),
}

impl Mode {
    /// Selects the mode for an optional brand argument.
    pub fn from_argument(argument: Option<&str>) -> Self {
        match argument {
            None | Some("") => Self::Report,
            Some(PRIME_SENTINEL) => Self::Prime,
            Some(REFRESH_SENTINEL) => Self::Refresh,
            Some(name) => Self::Switch(name.to_string()),
        }
    }
}

/// Current brand and alternatives, as shown by [`Mode::Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandReport {
    /// Pointer state.
    pub current: BrandPointer,
    /// Brand directories in listing order.
    pub available: Vec<String>,
}

impl fmt::Display for BrandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current brand: {}", self.current)?;
        write!(f, "Available brands: {}", self.available.join(", "))
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Report produced, nothing changed.
    Reported(BrandReport),
    /// Requested state already holds.
    Unchanged {
        /// Brand that is current.
        brand: String,
    },
    /// Brand established, manifests fabricated, platforms rebuilt.
    Established {
        /// Brand now current.
        brand: String,
        /// Platforms that were added back.
        platforms: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_selects_mode() {
        assert_eq!(Mode::from_argument(None), Mode::Report);
        assert_eq!(Mode::from_argument(Some("-")), Mode::Prime);
        assert_eq!(Mode::from_argument(Some("!")), Mode::Refresh);
        assert_eq!(Mode::from_argument(Some("Acme")), Mode::Switch("Acme".into()));
    }

    #[test]
    fn report_display() {
        let report = BrandReport {
            current: BrandPointer::Absent,
            available: vec!["Acme".into(), "SpiderOak".into()],
        };
        assert_eq!(
            report.to_string(),
            "Current brand: <no link>\nAvailable brands: Acme, SpiderOak"
        );
    }
}
