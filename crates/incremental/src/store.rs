//! Ordered document store.
//!
//! An `OrderedStore` keeps the visible, duplicate-free list of documents.
//! Documents are matched by key only. None of the operations move documents
//! they do not touch, so the relative order of untouched documents survives
//! every merge.

use crate::merge::{Applied, MergeReport};
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashSet;
use livepage_core::{ChangeKind, Document, DocumentChange, DocumentKey, InsertionEdge};

/// Duplicate-free ordered list of documents keyed by `DocumentKey`.
///
/// A key set answers membership in O(1), so an "added" record for a known
/// key and a "modified"/"removed" record for an unknown key never scan the
/// list. Locating a present document is a linear scan: O(window) per change,
/// O(window * changes) per batch in the worst case. Windows are bounded by the
/// configured growth step times the number of pages loaded.
#[derive(Clone)]
pub struct OrderedStore<T> {
    /// Documents in display order
    docs: VecDeque<Document<T>>,
    /// Keys of every document in `docs`
    keys: HashSet<DocumentKey>,
}

impl<T> Default for OrderedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            docs: VecDeque::new(),
            keys: HashSet::new(),
        }
    }

    /// Creates a store from documents in order, keeping the first occurrence
    /// of every key.
    pub fn from_docs(docs: impl IntoIterator<Item = Document<T>>) -> Self {
        let mut store = Self::new();
        for doc in docs {
            store.upsert_if_absent(doc, InsertionEdge::End);
        }
        store
    }

    /// Returns the number of documents.
    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns true if a document with this key is present.
    #[inline]
    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns the position of the document with this key.
    pub fn position(&self, key: &DocumentKey) -> Option<usize> {
        if !self.keys.contains(key) {
            return None;
        }
        self.docs.iter().position(|doc| doc.key() == key)
    }

    /// Returns the document with this key.
    pub fn get(&self, key: &DocumentKey) -> Option<&Document<T>> {
        self.position(key).and_then(|i| self.docs.get(i))
    }

    /// Returns the first document.
    #[inline]
    pub fn first(&self) -> Option<&Document<T>> {
        self.docs.front()
    }

    /// Returns the last document.
    #[inline]
    pub fn last(&self) -> Option<&Document<T>> {
        self.docs.back()
    }

    /// Iterates documents in display order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Document<T>> + ExactSizeIterator {
        self.docs.iter()
    }

    /// Iterates keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &DocumentKey> {
        self.docs.iter().map(Document::key)
    }

    /// Inserts a document at `edge` unless its key is already present.
    ///
    /// Returns true if the document was inserted. A known key is left
    /// untouched, including its position and value.
    pub fn upsert_if_absent(&mut self, doc: Document<T>, edge: InsertionEdge) -> bool {
        if self.keys.contains(doc.key()) {
            return false;
        }
        self.keys.insert(doc.key().clone());
        match edge {
            InsertionEdge::End => self.docs.push_back(doc),
            InsertionEdge::Start => self.docs.push_front(doc),
        }
        true
    }

    /// Overwrites the document with the same key in place.
    ///
    /// Returns false, leaving the store untouched, if the key is unknown.
    pub fn replace(&mut self, doc: Document<T>) -> bool {
        match self.position(doc.key()) {
            Some(i) => {
                self.docs[i] = doc;
                true
            }
            None => false,
        }
    }

    /// Removes the document with this key.
    pub fn remove(&mut self, key: &DocumentKey) -> Option<Document<T>> {
        let i = self.position(key)?;
        self.keys.remove(key);
        self.docs.remove(i)
    }

    /// Applies one change record.
    pub fn apply(&mut self, change: DocumentChange<T>, edge: InsertionEdge) -> Applied {
        let DocumentChange { kind, doc } = change;
        match kind {
            ChangeKind::Added => {
                if self.upsert_if_absent(doc, edge) {
                    Applied::Inserted
                } else {
                    Applied::Ignored
                }
            }
            ChangeKind::Modified => {
                if self.replace(doc) {
                    Applied::Replaced
                } else {
                    Applied::Ignored
                }
            }
            ChangeKind::Removed => match self.remove(doc.key()) {
                Some(_) => Applied::Removed,
                None => Applied::Ignored,
            },
        }
    }

    /// Applies a batch of change records in the order given.
    pub fn apply_batch(
        &mut self,
        changes: impl IntoIterator<Item = DocumentChange<T>>,
        edge: InsertionEdge,
    ) -> MergeReport {
        let mut report = MergeReport::new();
        for change in changes {
            let kind = change.kind;
            let applied = self.apply(change, edge);
            report.record(kind, applied);
        }
        report
    }

    /// Removes every document.
    pub fn clear(&mut self) {
        self.docs.clear();
        self.keys.clear();
    }

    /// Returns the documents as a contiguous vector.
    pub fn into_vec(self) -> Vec<Document<T>> {
        self.docs.into()
    }
}

impl<T: Clone> OrderedStore<T> {
    /// Clones the documents into a vector in display order.
    pub fn to_vec(&self) -> Vec<Document<T>> {
        self.docs.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for OrderedStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.docs == other.docs
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.docs.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a OrderedStore<T> {
    type Item = &'a Document<T>;
    type IntoIter = alloc::collections::vec_deque::Iter<'a, Document<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}
