//! Error types for livepage.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for livepage operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types surfaced by the pagination engine and its collaborators.
///
/// Subscription failures reported by a transport are stored verbatim in the
/// pagination state. Changes that reference unknown documents are never
/// errors; the store treats them as no-ops.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The remote store refused to serve the query.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },
    /// The live stream could not be established or was dropped.
    #[error("Unavailable: {message}")]
    Unavailable { message: String },
    /// Any other transport-reported failure.
    #[error("Transport error: {message}")]
    Transport { message: String },
    /// A document path that does not address a document.
    #[error("Invalid document key: {path:?}")]
    InvalidKey { path: String },
    /// An unrecognized configuration value.
    #[error("Invalid value {value:?} for option {name}")]
    InvalidOption { name: String, value: String },
}

impl Error {
    /// Creates a permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Error::PermissionDenied {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Error::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a generic transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(path: impl Into<String>) -> Self {
        Error::InvalidKey { path: path.into() }
    }

    /// Creates an invalid option error.
    pub fn invalid_option(name: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidOption {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true if this error was reported by a live subscription.
    pub fn is_subscription_error(&self) -> bool {
        matches!(
            self,
            Error::PermissionDenied { .. } | Error::Unavailable { .. } | Error::Transport { .. }
        )
    }
}
