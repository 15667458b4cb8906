//! Manifest fabrication from templates and brand values.
//!
//! Each entry of `custom/brand_elements.json` names an output file. Its
//! template is `<output>.template`; the transformer is chosen by the output's
//! extension:
//!
//! - `.plist`: [`PlistTemplate`], key replacement
//! - anything else: [`XmlTemplate`], selector-addressed text or attribute
//!
//! All bindings are applied in memory and the result is written in one atomic
//! replace, so a failing binding leaves the previous output untouched.
//!
//! Besides the templates, `.cordova/config.json` is fabricated outright.

mod property_list;
pub mod selector;
mod xml;

pub use property_list::PlistTemplate;
pub use xml::XmlTemplate;

use crate::packager::{
    Result,
    config::{FieldBinding, ManifestSpec, ProjectConfig, load_manifest_specs},
    settings::ProjectLayout,
    utils::fs,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A structured document that accepts binding substitutions.
pub trait TemplateTransformer {
    /// Applies one binding with its resolved `value`.
    fn replace(&mut self, binding: &FieldBinding, value: &str) -> Result<()>;

    /// Serializes the transformed document.
    fn render(&self) -> Result<Vec<u8>>;
}

/// Record written to `.cordova/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildToolConfig {
    /// Application identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BuildToolConfig {
    /// Record for the brand described by `config`.
    pub fn from_project(config: &ProjectConfig) -> Self {
        Self {
            id: config.identifier(),
            name: config.project_name(),
        }
    }
}

/// Regenerates every brand-dependent manifest of a project.
#[derive(Debug)]
pub struct ManifestFabricator<'a> {
    layout: &'a ProjectLayout,
}

impl<'a> ManifestFabricator<'a> {
    /// Fabricator writing into `layout`.
    pub fn new(layout: &'a ProjectLayout) -> Self {
        Self { layout }
    }

    /// Fabricates the build tool record and every declared manifest.
    ///
    /// Returns the paths written, in declaration order.
    pub async fn fabricate_all(&self, project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        let mut written = vec![self.fabricate_build_tool_config(project).await?];

        let specs = load_manifest_specs(&self.layout.brand_elements_file()).await?;
        for spec in &specs {
            written.push(self.fabricate_manifest(spec, project).await?);
        }
        Ok(written)
    }

    /// Writes `.cordova/config.json` as a single JSON line.
    pub async fn fabricate_build_tool_config(&self, project: &ProjectConfig) -> Result<PathBuf> {
        let path = self.layout.build_tool_config();
        let mut json = serde_json::to_vec(&BuildToolConfig::from_project(project))?;
        json.push(b'\n');
        fs::write_atomic(&path, &json).await?;
        log::info!("Fabricated {}", self.layout.relative(&path).display());
        Ok(path)
    }

    /// Fabricates one manifest from its template.
    pub async fn fabricate_manifest(
        &self,
        spec: &ManifestSpec,
        project: &ProjectConfig,
    ) -> Result<PathBuf> {
        let output = self.layout.resolve(&spec.output);
        let template = template_path(&output);

        let rendered = if is_plist(&output) {
            let mut subject = PlistTemplate::load(&template).await?;
            apply_bindings(&mut subject, &spec.bindings, project)?;
            subject.render()?
        } else {
            let mut subject = XmlTemplate::load(&template).await?;
            apply_bindings(&mut subject, &spec.bindings, project)?;
            subject.render()?
        };

        fs::write_atomic(&output, &rendered).await?;
        log::info!(
            "Fabricated project configuration file {}",
            self.layout.relative(&output).display()
        );
        Ok(output)
    }
}

/// Applies `bindings` in order, resolving each field from `project`.
///
/// An absent field substitutes the empty string.
pub fn apply_bindings<T: TemplateTransformer>(
    subject: &mut T,
    bindings: &[FieldBinding],
    project: &ProjectConfig,
) -> Result<()> {
    for binding in bindings {
        let value = project.field(&binding.field).unwrap_or_else(|| {
            log::warn!(
                "Brand field '{}' not set in {}, substituting empty value at '{}'",
                binding.field,
                project.path().display(),
                binding.selector
            );
            String::new()
        });
        subject.replace(binding, &value)?;
    }
    Ok(())
}

/// `<output>.template`
pub fn template_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(ProjectLayout::TEMPLATE_SUFFIX);
    PathBuf::from(name)
}

fn is_plist(output: &Path) -> bool {
    output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("plist"))
}
