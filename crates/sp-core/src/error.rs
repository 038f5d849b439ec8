//! Unified error type for the streampack application.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for HTTP handlers to derive a status code via
//! [`Error::http_status`] and, for tool failures, the captured output so the
//! API can attach it as a `details` field.

/// Unified error type covering all failure modes in streampack.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation (missing upload, wrong extension, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool (ffmpeg, ffprobe, packager) failed to run.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
        /// Combined stdout/stderr captured from the tool, if any.
        output: Option<String>,
    },

    /// Failed to parse an external tool's output.
    #[error("Parse error [{tool}]: {message}")]
    Parse {
        /// Name of the tool whose output was unparseable.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Scratch workspace error.
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    ///
    /// Client-input problems are 400; environment, tool, and parse failures
    /// are terminal server errors.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Tool { .. } => 500,
            Error::Parse { .. } => 500,
            Error::Workspace(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Captured tool output, if this error carries any.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Error::Tool { output, .. } => output.as_deref(),
            _ => None,
        }
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Convenience constructor for [`Error::Tool`] without captured output.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
            output: None,
        }
    }

    /// Convenience constructor for [`Error::Tool`] with captured output.
    pub fn tool_with_output(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
            output: Some(output.into()),
        }
    }

    /// Convenience constructor for [`Error::Parse`].
    pub fn parse(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
