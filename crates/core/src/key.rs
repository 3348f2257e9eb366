//! Document keys.
//!
//! A `DocumentKey` is the stable identity of a document inside the remote
//! store: a slash-separated path such as `rooms/lobby/messages/m1`. Keys are
//! the only thing used to match documents across change batches.

use crate::error::{Error, Result};
use alloc::string::String;
use core::fmt;

/// Stable path addressing one document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DocumentKey {
    path: String,
}

impl DocumentKey {
    /// Creates a key from a path without validating it.
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Parses a path, rejecting empty paths and empty segments.
    pub fn parse(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() || trimmed.split('/').any(str::is_empty) {
            return Err(Error::invalid_key(path));
        }
        Ok(Self::new(trimmed))
    }

    /// Returns the full path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last path segment, the document id.
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Returns the path of the parent collection, if any.
    pub fn parent(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for DocumentKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentKey {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
