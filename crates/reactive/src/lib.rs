//! Livepage Reactive - Paginated views over live queries.
//!
//! A live query delivers an initial snapshot followed by an unbounded stream
//! of added/modified/removed records, each describing the full window the
//! query observes. This crate reconciles that stream into a stable list that
//! grows on demand, reports whether more data is available, and restarts
//! cleanly when the query changes.
//!
//! # Core Concepts
//!
//! - `PaginationState` / `Action`: The change-merge reducer
//! - `PaginationController`: Owns one live subscription per query identity
//! - `Transport`: Boundary to whatever opens and closes live subscriptions
//! - `Listener`: Callback sink a transport delivers snapshots and errors to
//! - `is_same_query` / `QueryRef`: Structural query identity
//!
//! # Growing Window
//!
//! Loading more never sends a cursor. The controller closes the subscription
//! and re-opens the same query with a larger limit; documents already shown
//! come back as "added" and are absorbed by the store. This trades some
//! redundant delivery for not tracking cursors across re-subscribes, and it
//! decides which documents are visible when the collection changes between
//! pages.
//!
//! # Example
//!
//! ```ignore
//! use livepage_core::PaginationOptions;
//! use livepage_reactive::PaginationController;
//!
//! let mut pages = PaginationController::new(transport, PaginationOptions::new());
//! pages.observe(|state| {
//!     println!("{} items, more: {}", state.items().len(), state.has_more());
//! });
//!
//! pages.set_query(Some(query));
//! pages.load_more();
//! ```

#![no_std]

extern crate alloc;

pub mod controller;
pub mod identity;
pub mod observer;
pub mod state;
pub mod subscription;
pub mod transport;

pub use controller::PaginationController;
pub use identity::{is_same_query, QueryRef};
pub use observer::{ObserverId, ObserverRegistry, StateCallback};
pub use state::{reduce, Action, PaginationState, PaginationView};
pub use subscription::{Generation, Listener};
pub use transport::Transport;

// Re-export commonly used types from dependencies
pub use livepage_core::{
    ChangeKind, Document, DocumentChange, DocumentKey, Error, InsertionEdge, PaginationOptions,
    QueryDescriptor, Result, Snapshot,
};
pub use livepage_incremental::{MergeReport, OrderedStore};
