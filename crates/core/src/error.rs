//! Error types for the version gate.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving context or running the gate.
///
/// Policy outcomes (version unchanged, version decreased, and so on) are not
/// errors; they are carried as [`crate::gate::Verdict::Failed`] values. This
/// enum covers the conditions the gate does not decide on itself: broken
/// event context, unreadable or malformed documents, and hosting-API
/// transport failures.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The Actions event context could not be resolved.
    #[error("Event context error: {message}")]
    #[diagnostic(
        code(chartgate::core::context),
        help("GITHUB_EVENT_NAME and GITHUB_REPOSITORY must be set; this tool expects to run inside a workflow")
    )]
    Context {
        /// The error message
        message: String,
    },

    /// A version string could not be parsed as semantic version.
    #[error("Invalid version: {version}")]
    #[diagnostic(
        code(chartgate::core::invalid_version),
        help("Version must follow semantic versioning (e.g., 1.0.0, 2.1.0-beta.1)")
    )]
    InvalidVersion {
        /// The invalid version string
        version: String,
    },

    /// A hosting-API call failed.
    #[error("Hosting API error: {message}")]
    #[diagnostic(code(chartgate::core::host))]
    Host {
        /// The error message
        message: String,
    },

    /// A chart definition file could not be read.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(
        code(chartgate::core::read),
        help("Check that the chart directory is part of the checkout and readable")
    )]
    Read {
        /// The path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(chartgate::core::io))]
    Io(#[from] std::io::Error),

    /// Wrapped YAML parsing error.
    #[error("YAML parse error: {0}")]
    #[diagnostic(code(chartgate::core::yaml))]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped JSON parsing error.
    #[error("JSON parse error: {0}")]
    #[diagnostic(code(chartgate::core::json))]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new event context error.
    #[must_use]
    pub fn context(message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
        }
    }

    /// Create a new invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a new hosting-API error.
    #[must_use]
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Create a new read error.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
