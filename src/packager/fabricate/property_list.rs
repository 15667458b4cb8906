//! Property list templates (`<Project>-Info.plist`).

use super::TemplateTransformer;
use crate::packager::{Error, Result, config::FieldBinding};
use plist::{Dictionary, Value};
use std::path::{Path, PathBuf};

/// A plist template whose top-level dictionary receives substitutions.
///
/// The selector of a binding is a top-level key; the whole value is replaced
/// with a string. Attribute names have no meaning here and are ignored.
#[derive(Debug, Clone)]
pub struct PlistTemplate {
    template: PathBuf,
    root: Dictionary,
}

impl PlistTemplate {
    /// Reads the template at `template`.
    pub async fn load(template: &Path) -> Result<Self> {
        let path = template.to_path_buf();
        let value = tokio::task::spawn_blocking(move || Value::from_file(&path)).await??;
        Self::from_value(template, value)
    }

    /// Wraps an already-parsed plist. The root must be a dictionary.
    pub fn from_value(template: impl Into<PathBuf>, value: Value) -> Result<Self> {
        let template = template.into();
        match value {
            Value::Dictionary(root) => Ok(Self { template, root }),
            _ => Err(Error::TemplateSyntax {
                template,
                reason: "root element is not a dictionary".to_string(),
            }),
        }
    }

    /// Current value of top-level `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

impl TemplateTransformer for PlistTemplate {
    fn replace(&mut self, binding: &FieldBinding, value: &str) -> Result<()> {
        if let Some(attribute) = &binding.attribute {
            log::debug!(
                "Ignoring attribute '{}' for plist key {}",
                attribute,
                binding.selector
            );
        }

        match self.root.get_mut(&binding.selector) {
            Some(slot) => {
                *slot = Value::String(value.to_string());
                Ok(())
            }
            None => Err(Error::TemplateBindingNotFound {
                template: self.template.clone(),
                selector: binding.selector.clone(),
            }),
        }
    }

    fn render(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Value::Dictionary(self.root.clone()).to_writer_xml(&mut out)?;
        out.push(b'\n');
        Ok(out)
    }
}
