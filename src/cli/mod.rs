//! Command line interface for the brand packager.
//!
//! This module parses arguments, runs the selected packaging operation and
//! reports the outcome to the user.

mod args;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use anyhow::Context;
use crate::packager::{BrandPackager, CopyReport, Mode, Outcome};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    match execute(&args, &config).await {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error(&e.to_string())?;
            for suggestion in e.recovery_suggestions() {
                config.indent(&suggestion)?;
            }
            Ok(1)
        }
    }
}

/// Runs the operation selected by `args`.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let packager = BrandPackager::new(args.settings()?);

    match &args.command {
        Some(Command::Customize) => {
            let report = packager.customize().await?;
            present_copies(config, "Customization", &report)
                .context("writing customization summary")?;
        }
        Some(Command::Icons) => {
            let report = packager.provision_icons().await?;
            present_copies(config, "Icons", &report).context("writing icon summary")?;
        }
        None => {
            let mode = Mode::from_argument(args.brand.as_deref());
            let outcome = packager.run(&mode).await?;
            present_outcome(config, &outcome).context("writing outcome")?;
        }
    }
    Ok(())
}

fn present_outcome(config: &RuntimeConfig, outcome: &Outcome) -> std::io::Result<()> {
    match outcome {
        Outcome::Reported(report) => config.output().println(&report.to_string()),
        Outcome::Unchanged { brand } => config.success(&format!("Brand {brand} already current")),
        Outcome::Established { brand, platforms } => {
            config.success(&format!("Established brand {brand}"))?;
            if !platforms.is_empty() {
                config.indent(&format!("Platforms: {}", platforms.join(" ")))?;
            }
            Ok(())
        }
    }
}

fn present_copies(config: &RuntimeConfig, title: &str, report: &CopyReport) -> std::io::Result<()> {
    config.section(title)?;
    for path in &report.copied {
        config.indent(&path.display().to_string())?;
    }
    if report.skipped > 0 {
        config.warn(&format!("{} item(s) skipped", report.skipped))?;
    }
    config.success(&format!(
        "{} file(s) copied, {} action(s) run",
        report.copied.len(),
        report.actions
    ))
}

