//! External build tool detection and invocation.

use crate::packager::{Error, Result};
use std::path::{Path, PathBuf};

/// A resolved build tool executable.
#[derive(Debug, Clone)]
pub struct BuildTool {
    name: String,
    program: PathBuf,
}

impl BuildTool {
    /// Resolves `tool` on `PATH` (or as a path).
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotFound`] when no executable is found.
    pub fn locate(tool: &str) -> Result<Self> {
        match which::which(tool) {
            Ok(program) => {
                log::debug!("Found {} at: {}", tool, program.display());
                Ok(Self {
                    name: tool_name(tool),
                    program,
                })
            }
            Err(e) => Err(Error::ToolNotFound {
                tool: tool.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Runs `<tool> <args>` in `cwd` with inherited stdio.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandFailed`] if the process cannot be started
    /// - [`Error::ExternalToolFailure`] on a non-zero exit
    pub async fn run(&self, cwd: &Path, args: &[String]) -> Result<()> {
        let command = self.describe(args);
        log::debug!("Running {} in {}", command, cwd.display());

        let status = tokio::process::Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?;

        if !status.success() {
            log::error!("{} exited with {:?}", command, status.code());
            return Err(Error::ExternalToolFailure {
                command,
                status: status.code(),
            });
        }
        Ok(())
    }

    /// Command line as shown to the operator.
    pub fn describe(&self, args: &[String]) -> String {
        std::iter::once(self.name.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn tool_name(tool: &str) -> String {
    Path::new(tool)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| tool.to_string())
}
