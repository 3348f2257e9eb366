//! Livepage Core - Core types for paginated live queries.
//!
//! This crate provides the foundational types shared by the livepage crates:
//!
//! - `DocumentKey`: Stable slash-separated path identifying a remote record
//! - `Document`: A record snapshot (possibly missing) plus its key
//! - `DocumentChange` / `ChangeKind`: One added, modified or removed record
//! - `Snapshot`: A live-query delivery (full window + ordered changes)
//! - `QueryDescriptor`: Structural equality capability for query descriptors
//! - `PaginationOptions`: Step size, insertion edge and pass-through options
//! - `Error`: Error types for subscriptions and configuration
//!
//! # Example
//!
//! ```rust
//! use livepage_core::{Document, DocumentChange, Snapshot};
//!
//! let docs = vec![
//!     Document::new("rooms/lobby", "Lobby"),
//!     Document::new("rooms/games", "Games"),
//! ];
//! let snapshot = Snapshot::initial(docs);
//!
//! assert_eq!(snapshot.len(), 2);
//! assert!(snapshot.changes.iter().all(DocumentChange::is_added));
//! assert_eq!(snapshot.last().map(|doc| doc.id()), Some("games"));
//! ```

#![no_std]

extern crate alloc;

mod change;
mod document;
mod error;
mod key;
mod options;
pub mod projection;
mod query;

pub use change::{ChangeKind, DocumentChange, Snapshot};
pub use document::Document;
pub use error::{Error, Result};
pub use key::DocumentKey;
pub use options::{InsertionEdge, PaginationOptions, DEFAULT_STEP_LIMIT};
pub use projection::WithIdField;
pub use query::QueryDescriptor;
