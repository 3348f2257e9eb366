//! Livepage Incremental - Ordered document store for live query windows.
//!
//! This crate merges the per-document change records of a live query into a
//! duplicate-free ordered list without disturbing documents a batch does not
//! touch.
//!
//! # Core Concepts
//!
//! - `OrderedStore<T>`: The visible list, keyed by `DocumentKey`
//! - `MergeReport`: Counts of what a batch inserted, replaced, removed or ignored
//!
//! # Merge Rules
//!
//! - added: insert at the configured edge if the key is unknown, else no-op
//! - modified: overwrite in place if the key is known, else no-op
//! - removed: delete if the key is known, else no-op
//!
//! # Example
//!
//! ```rust
//! use livepage_core::{Document, DocumentChange, InsertionEdge};
//! use livepage_incremental::OrderedStore;
//!
//! let mut store = OrderedStore::new();
//! let report = store.apply_batch(
//!     vec![
//!         DocumentChange::added(Document::new("todos/1", "write docs")),
//!         DocumentChange::added(Document::new("todos/2", "ship")),
//!         DocumentChange::modified(Document::new("todos/1", "write more docs")),
//!     ],
//!     InsertionEdge::End,
//! );
//!
//! assert_eq!(store.len(), 2);
//! assert!(report.is_adding());
//! assert_eq!(report.replaced, 1);
//! ```

#![no_std]

extern crate alloc;

pub mod merge;
pub mod store;

pub use merge::{Applied, MergeReport};
pub use store::OrderedStore;
