//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! the runtime configuration derived from the parsed arguments.

use crate::packager::{
    Result as PackagerResult, Settings, SettingsBuilder,
    driver::{PRIME_SENTINEL, REFRESH_SENTINEL},
    settings::{DEFAULT_BRAND, DEFAULT_BUILD_TOOL},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brand packager for Cordova-style mobile projects
#[derive(Parser, Debug)]
#[command(
    name = "brand_package",
    version,
    about = "Switches a mobile project between brands",
    long_about = "Establishes a brand for a mobile project: points custom/brand at the brand,
fabricates brand-dependent manifests from their templates and rebuilds the platform trees.

Usage:
  brand_package            report the current brand and the available ones
  brand_package -          establish the default brand unless one is current
  brand_package !          redo processing for the current brand
  brand_package Acme       make Acme the current brand
  brand_package customize  copy brand elements into prepared platform trees
  brand_package icons      copy launcher icons into prepared platform trees",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    /// Brand name, '-' to prime with the default brand or '!' to refresh
    #[arg(value_name = "BRAND")]
    pub brand: Option<String>,

    /// Project root containing custom/, platforms/ and www/
    #[arg(
        long,
        value_name = "DIR",
        env = "BRAND_PROJECT_ROOT",
        default_value = ".",
        global = true
    )]
    pub project_root: PathBuf,

    /// Brand established when priming
    #[arg(
        long,
        value_name = "NAME",
        env = "BRAND_DEFAULT",
        default_value = DEFAULT_BRAND,
        global = true
    )]
    pub default_brand: String,

    /// Build tool that manages the platform trees
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "BRAND_BUILD_TOOL",
        default_value = DEFAULT_BUILD_TOOL,
        global = true
    )]
    pub build_tool: String,

    /// Only print errors and requested reports
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Hook to run instead of establishing a brand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Hooks run after the build tool has prepared platform trees
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy custom/elements.json items into the platform trees
    Customize,
    /// Copy launcher icons from www/res/icon into the platform trees
    Icons,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.default_brand.is_empty() {
            return Err("Default brand cannot be empty".to_string());
        }
        if [PRIME_SENTINEL, REFRESH_SENTINEL].contains(&self.default_brand.as_str()) {
            return Err(format!(
                "Default brand cannot be '{}', it is reserved",
                self.default_brand
            ));
        }
        if self.build_tool.is_empty() {
            return Err("Build tool cannot be empty".to_string());
        }
        Ok(())
    }

    /// Packaging settings for these arguments
    pub fn settings(&self) -> PackagerResult<Settings> {
        SettingsBuilder::new()
            .project_root(&self.project_root)
            .default_brand(&self.default_brand)
            .build_tool(&self.build_tool)
            .build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
