//! Change records and snapshots delivered by a live query.
//!
//! Every delivery from a live subscription is a `Snapshot`: the complete
//! window the query currently observes plus the ordered list of per-document
//! changes since the previous delivery on the same subscription.

use crate::document::Document;
use alloc::vec::Vec;

/// Kind of change applied to one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChangeKind {
    /// The document entered the window.
    Added,
    /// The document changed while inside the window.
    Modified,
    /// The document left the window.
    Removed,
}

/// One change record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentChange<T> {
    pub kind: ChangeKind,
    pub doc: Document<T>,
}

impl<T> DocumentChange<T> {
    /// Creates a change record.
    #[inline]
    pub fn new(kind: ChangeKind, doc: Document<T>) -> Self {
        Self { kind, doc }
    }

    /// Creates an added record.
    #[inline]
    pub fn added(doc: Document<T>) -> Self {
        Self::new(ChangeKind::Added, doc)
    }

    /// Creates a modified record.
    #[inline]
    pub fn modified(doc: Document<T>) -> Self {
        Self::new(ChangeKind::Modified, doc)
    }

    /// Creates a removed record.
    #[inline]
    pub fn removed(doc: Document<T>) -> Self {
        Self::new(ChangeKind::Removed, doc)
    }

    /// Returns true if this is an addition.
    #[inline]
    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }
}

/// A delivery from a live subscription.
///
/// - `docs`: the full ordered window after the changes apply
/// - `changes`: the per-document changes, in transport order
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<T> {
    /// The complete current window
    pub docs: Vec<Document<T>>,
    /// Changes since the previous delivery on the same subscription
    pub changes: Vec<DocumentChange<T>>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            changes: Vec::new(),
        }
    }
}

impl<T> Snapshot<T> {
    /// Creates a snapshot from a window and its changes.
    #[inline]
    pub fn new(docs: Vec<Document<T>>, changes: Vec<DocumentChange<T>>) -> Self {
        Self { docs, changes }
    }

    /// Returns true if the snapshot carries no changes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of change records.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns the last document of the window.
    #[inline]
    pub fn last(&self) -> Option<&Document<T>> {
        self.docs.last()
    }

    /// Returns true if any change is an addition.
    pub fn has_additions(&self) -> bool {
        self.changes.iter().any(DocumentChange::is_added)
    }

    /// Adds a change record.
    #[inline]
    pub fn push(&mut self, change: DocumentChange<T>) {
        self.changes.push(change);
    }
}

impl<T: Clone> Snapshot<T> {
    /// Creates the first snapshot of a subscription.
    ///
    /// Every document of the window is reported as an addition.
    pub fn initial(docs: Vec<Document<T>>) -> Self {
        Self {
            changes: docs.iter().cloned().map(DocumentChange::added).collect(),
            docs,
        }
    }
}
