//! Platform asset provisioning.
//!
//! Runs after the build tool has prepared platform trees:
//!
//! - [`AssetCopier`] applies `custom/elements.json`
//! - [`IconProvisioner`] copies the fixed launcher icon table
//!
//! Both join every copy they start before returning.

mod actions;
mod copier;
mod icons;

pub use actions::{ActionContext, ActionHandler, ActionRegistry};
pub use copier::AssetCopier;
pub use icons::{ANDROID_ICONS, IOS_ICONS, IconProvisioner};

use std::path::PathBuf;

/// Outcome of a provisioning pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Files written, in completion order.
    pub copied: Vec<PathBuf>,
    /// Copies skipped because a destination or source was missing.
    pub skipped: usize,
    /// Action handler invocations.
    pub actions: usize,
}
