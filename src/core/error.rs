//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`HostError`] - A failure reported by a browser API (`name` + `message`)
//! - [`CollectError`] - Directory selection and enumeration errors
//! - [`GalleryError`] - Turning collected files into displayable resources
//! - [`ConfigError`] - Embedded gallery configuration errors

use thiserror::Error;

/// Name the host gives a prompt the user dismissed.
pub const ABORT_ERROR: &str = "AbortError";

/// Error raised by a host API, split into its kind and message.
///
/// In the browser these are the `name` and `message` properties of the
/// rejected `Error`/`DOMException`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct HostError {
    pub kind: String,
    pub message: String,
}

impl HostError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The user dismissed the prompt.
    pub fn is_abort(&self) -> bool {
        self.kind == ABORT_ERROR
    }
}

/// Errors from [`collect`](crate::core::collector::collect).
///
/// A dismissed prompt is not an error; it is reported as
/// [`Collected::Cancelled`](crate::core::collector::Collected::Cancelled).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    /// The directory prompt failed for a reason other than cancellation.
    #[error("directory prompt failed ({kind}): {message}")]
    PromptFailed { kind: String, message: String },
    /// The selected root directory could not be listed.
    #[error("failed to read selected directory: {0}")]
    Walk(HostError),
    /// The host environment lacks something the acquisition path needs.
    #[error("{0}")]
    Unavailable(&'static str),
}

impl From<HostError> for CollectError {
    fn from(err: HostError) -> Self {
        Self::PromptFailed {
            kind: err.kind,
            message: err.message,
        }
    }
}

/// Errors while building gallery items from collected files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// File content could not be read.
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: HostError },
    /// The host refused to create a renderable resource.
    #[error("failed to create object URL: {0}")]
    ObjectUrl(String),
}

/// Errors loading the embedded gallery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid gallery configuration: {0}")]
    Parse(String),
}
