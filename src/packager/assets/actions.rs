//! Named target actions for customization elements.
//!
//! Elements with a `TargetAction` instead of a `TargetFolder` hand each matched
//! file to a handler registered here. The element list is checked against the
//! registry when it is loaded.

use crate::packager::{Error, Result};
use std::{collections::HashMap, fmt, path::Path};

/// Everything a handler knows about one matched file.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Action name being dispatched.
    pub action: &'a str,
    /// Directory the file was matched in.
    pub source_dir: &'a Path,
    /// Matched file name.
    pub source_name: &'a str,
    /// Platform as written in the element.
    pub platform: &'a str,
    /// Root of that platform's tree.
    pub platform_root: &'a Path,
}

/// Handler signature.
pub type ActionHandler = fn(&ActionContext<'_>) -> Result<()>;

/// Action name to handler table.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, ActionHandler>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("ActionRegistry").field("actions", &names).finish()
    }
}

impl ActionRegistry {
    /// Registry holding the built-in actions.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register("iOSaddCertificate", ios_add_certificate);
        registry
    }

    /// Adds or replaces the handler for `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: ActionHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Runs the handler named by `ctx.action`.
    pub fn dispatch(&self, ctx: &ActionContext<'_>) -> Result<()> {
        let handler = self
            .handlers
            .get(ctx.action)
            .ok_or_else(|| Error::UnknownAction {
                action: ctx.action.to_string(),
            })?;
        handler(ctx)
    }
}

/// Records a signing certificate for the iOS build.
///
/// Installing it into a keychain is left to the build tool's signing step.
fn ios_add_certificate(ctx: &ActionContext<'_>) -> Result<()> {
    let certificate = ctx.source_dir.join(ctx.source_name);
    log::info!(
        "Action {} on {}: certificate {} for {}",
        ctx.action,
        ctx.platform,
        certificate.display(),
        ctx.platform_root.display()
    );
    Ok(())
}
