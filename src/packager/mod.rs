//! Brand packaging for a multi-platform mobile project.
//!
//! A project keeps one directory per brand under `custom/brands/` and a
//! `custom/brand` symlink naming the current one. Establishing a brand
//! regenerates brand-dependent manifests from templates and has the build
//! tool rebuild every platform tree. After the build tool has prepared the
//! trees, brand assets and launcher icons are copied into them.

pub mod assets;
pub mod config;
pub mod driver;
pub mod error;
pub mod fabricate;
pub mod platform;
pub mod registry;
pub mod settings;
pub mod utils;

pub use assets::{ActionRegistry, CopyReport};
pub use driver::{BrandContext, BrandPackager, BrandReport, Mode, Outcome};
pub use error::{Error, Result};
pub use registry::{BrandPointer, BrandRegistry};
pub use settings::{ProjectLayout, Settings, SettingsBuilder};
