//! Configuration structures for brand packaging.
//!
//! [`Settings`] is assembled once from CLI arguments through
//! [`SettingsBuilder`] and passed by reference into every pipeline stage.

mod builder;
mod core;
mod layout;

pub use builder::SettingsBuilder;
pub use core::{DEFAULT_BRAND, DEFAULT_BUILD_TOOL, Settings, default_platforms};
pub use layout::ProjectLayout;
