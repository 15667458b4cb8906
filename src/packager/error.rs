//! Error types for brand packaging operations.
//!
//! Every fatal condition of the pipeline maps to one variant here. Nothing is
//! retried: callers propagate with `?` and the binary exits non-zero.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the brand packaging pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested brand has no directory under the brands root.
    #[error("No such brand dir {name}: {}", .path.display())]
    BrandNotFound {
        /// Brand name as requested
        name: String,
        /// Directory that was expected to exist
        path: PathBuf,
    },

    /// Something other than a symlink occupies the pointer location.
    #[error(
        "File or directory blocking brand symlink, please remove it: {}",
        .path.display()
    )]
    FilesystemConflict {
        /// Pointer location
        path: PathBuf,
    },

    /// The pointer did not read back as the brand just established.
    #[error("Brand link creation failed: {}", .path.display())]
    PointerNotEstablished {
        /// Pointer location
        path: PathBuf,
    },

    /// An operation needs a current brand but the pointer is absent or stale.
    #[error("No current brand to reestablish")]
    NoCurrentBrand,

    /// A customization element names a platform with no destination mapping.
    #[error("Unrecognized customization platform '{platform}'")]
    UnknownPlatform {
        /// Platform identifier as written in the element list
        platform: String,
    },

    /// A customization element names an action that is not registered.
    #[error("Unknown targetAction '{action}'")]
    UnknownAction {
        /// Action name as written in the element list
        action: String,
    },

    /// Authoring mistake in a declarative configuration file.
    #[error("Configuration error in {}: {reason}", .path.display())]
    Configuration {
        /// File holding the faulty declaration
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// A template binding selector matched nothing in the template.
    #[error("Template {} has no node matching '{selector}'", .template.display())]
    TemplateBindingNotFound {
        /// Template being transformed
        template: PathBuf,
        /// Selector from the binding
        selector: String,
    },

    /// Template could not be parsed or re-serialized.
    #[error("Malformed template {}: {reason}", .template.display())]
    TemplateSyntax {
        /// Template being transformed
        template: PathBuf,
        /// Parser or writer message
        reason: String,
    },

    /// The external build tool exited unsuccessfully.
    #[error("{command} failed ({})", describe_status(.status))]
    ExternalToolFailure {
        /// Full command line that was run
        command: String,
        /// Exit code, `None` when killed by a signal
        status: Option<i32>,
    },

    /// The external build tool could not be started.
    #[error("Failed to run {command}: {error}")]
    CommandFailed {
        /// Command that failed to spawn
        command: String,
        /// Underlying spawn error
        error: std::io::Error,
    },

    /// The build tool binary is not on PATH.
    #[error("Build tool '{tool}' not found: {reason}")]
    ToolNotFound {
        /// Program name or path
        tool: String,
        /// Lookup failure
        reason: String,
    },

    /// I/O error annotated with the operation and path.
    #[error("Error {context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },

    /// Bare I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Property list error.
    #[error("Plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Invalid element source pattern.
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A spawned copy task panicked or was cancelled.
    #[error("Copy task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "terminated by signal".to_string(), |code| code.to_string())
}

/// Attach operation and path context to I/O results.
pub trait ErrorExt<T> {
    /// Convert the error into [`Error::Fs`] describing `context` on `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Turn missing values into [`Error::GenericError`].
pub trait Context<T> {
    /// Fail with `msg` if the value is missing.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
