//! Brand packager library for Cordova-style mobile projects
//!
//! This library switches a project between brands:
//! - maintains the `custom/brand` pointer
//! - fabricates brand-dependent manifests from templates
//! - rebuilds platform trees through the build tool
//! - copies brand assets and icons into prepared platform trees
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
