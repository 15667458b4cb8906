//! Top-level error types for the brand packager binary.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type surfaced by the CLI
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error("{0}")]
    Packager(#[from] crate::packager::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::packager::Error;
        match self {
            Self::Packager(Error::BrandNotFound { .. }) => {
                vec!["Run without arguments to list the available brands".to_string()]
            }
            Self::Packager(Error::NoCurrentBrand) => {
                vec!["Establish a brand first, or prime the project with '-'".to_string()]
            }
            Self::Packager(Error::FilesystemConflict { path }) => vec![format!(
                "Move {} aside so it can be replaced by the brand link",
                path.display()
            )],
            Self::Packager(Error::ToolNotFound { tool, .. }) => {
                vec![format!("Install {tool} or select another one with --build-tool")]
            }
            _ => Vec::new(),
        }
    }
}
