//! Document structure.
//!
//! A `Document` is an immutable value snapshot of one remote record plus its
//! key. A "modified" event replaces the stored document wholesale; documents
//! are never patched field by field.

use crate::key::DocumentKey;

/// A snapshot of a single remote record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document<T> {
    /// Stable identity of the record.
    key: DocumentKey,
    /// Record contents; `None` when the document no longer exists.
    data: Option<T>,
}

impl<T> Document<T> {
    /// Creates a document that exists with the given data.
    pub fn new(key: impl Into<DocumentKey>, data: T) -> Self {
        Self {
            key: key.into(),
            data: Some(data),
        }
    }

    /// Creates a document snapshot for a record that does not exist.
    pub fn missing(key: impl Into<DocumentKey>) -> Self {
        Self {
            key: key.into(),
            data: None,
        }
    }

    /// Returns the document key.
    #[inline]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Returns the document id (last key segment).
    #[inline]
    pub fn id(&self) -> &str {
        self.key.id()
    }

    /// Returns the record contents, if the document exists.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Returns true if the document exists.
    #[inline]
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// Returns true if both documents address the same record.
    #[inline]
    pub fn same_key(&self, other: &Document<T>) -> bool {
        self.key == other.key
    }

    /// Consumes the document, returning its contents.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Consumes the document, returning key and contents.
    pub fn into_parts(self) -> (DocumentKey, Option<T>) {
        (self.key, self.data)
    }
}
