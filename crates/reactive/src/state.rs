//! Pagination state and the change-merge reducer.
//!
//! `PaginationState` is a record updated by one total transition per
//! `Action`. The window grows by re-requesting the same live query with a
//! larger limit rather than by paging with a cursor: already-seen documents
//! are re-delivered as "added" and absorbed by the store, and the stagnation
//! check below turns a redelivery that brought nothing new into an
//! end-of-data verdict.

use alloc::vec::Vec;
use livepage_core::{Document, DocumentKey, Error, InsertionEdge, Snapshot, WithIdField};
use livepage_incremental::{MergeReport, OrderedStore};
use tracing::trace;

/// Input to the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Action<T> {
    /// A snapshot arrived from the live subscription.
    Loaded {
        snapshot: Snapshot<T>,
        step_limit: usize,
        edge: InsertionEdge,
    },
    /// The consumer asked for one more step.
    LoadMore,
    /// The live subscription failed.
    Error(Error),
    /// Back to the initial state.
    Reset,
}

/// State of one paginated live query.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationState<T> {
    /// Visible documents, unique by key
    items: OrderedStore<T>,
    /// Window size the next request would use; 0 before the first snapshot
    limit: usize,
    has_more: bool,
    /// Set by the first merged snapshot, cleared only by reset
    loaded: bool,
    loading_more: bool,
    /// Last document of the most recent snapshot's window
    last_loaded: Option<Document<T>>,
    /// Key of `last_loaded` as of the latest load-more; marks the request only
    after: Option<DocumentKey>,
    error: Option<Error>,
}

impl<T> Default for PaginationState<T> {
    fn default() -> Self {
        Self {
            items: OrderedStore::new(),
            limit: 0,
            has_more: false,
            loaded: false,
            loading_more: false,
            last_loaded: None,
            after: None,
            error: None,
        }
    }
}

impl<T> PaginationState<T> {
    /// Creates the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible documents.
    #[inline]
    pub fn items(&self) -> &OrderedStore<T> {
        &self.items
    }

    /// Returns the window size the next request would use.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns true if more documents may exist beyond the window.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns true once a snapshot has been merged.
    #[inline]
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Returns true while a load-more is waiting for its snapshot.
    #[inline]
    pub fn loading_more(&self) -> bool {
        self.loading_more
    }

    /// Returns the last document of the latest snapshot.
    #[inline]
    pub fn last_loaded(&self) -> Option<&Document<T>> {
        self.last_loaded.as_ref()
    }

    /// Returns the key recorded by the latest load-more.
    #[inline]
    pub fn after(&self) -> Option<&DocumentKey> {
        self.after.as_ref()
    }

    /// Returns the subscription error, if any.
    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns the window a subscription should request: the current limit,
    /// or one step before anything has loaded.
    #[inline]
    pub fn window_size(&self, step_limit: usize) -> usize {
        if self.limit == 0 {
            step_limit
        } else {
            self.limit
        }
    }

    /// Applies one action.
    pub fn apply(&mut self, action: Action<T>) {
        match action {
            Action::Loaded {
                snapshot,
                step_limit,
                edge,
            } => {
                self.on_loaded(snapshot, step_limit, edge);
            }
            Action::LoadMore => self.on_load_more(),
            Action::Error(error) => self.on_error(error),
            Action::Reset => *self = Self::default(),
        }
    }

    /// Merges a snapshot and recomputes the window bookkeeping.
    pub fn on_loaded(
        &mut self,
        snapshot: Snapshot<T>,
        step_limit: usize,
        edge: InsertionEdge,
    ) -> MergeReport {
        let Snapshot { docs, changes } = snapshot;
        let report = self.items.apply_batch(changes, edge);

        let len = self.items.len();
        let next_limit = len + step_limit;
        // Fewer than a step in total, or growing by a step would ask for
        // exactly the window we already asked for.
        let reached_end = len < step_limit || next_limit == self.limit;

        // Edits and removals say nothing about documents beyond the window.
        if report.is_adding() {
            self.has_more = !reached_end;
        }

        self.limit = next_limit;
        self.loaded = true;
        self.loading_more = false;
        self.last_loaded = docs.into_iter().last();
        self.error = None;

        trace!(
            inserted = report.inserted,
            replaced = report.replaced,
            removed = report.removed,
            ignored = report.ignored,
            len,
            limit = next_limit,
            has_more = self.has_more,
            "merged snapshot"
        );
        report
    }

    fn on_load_more(&mut self) {
        self.loading_more = true;
        self.after = self.last_loaded.as_ref().map(|doc| doc.key().clone());
    }

    fn on_error(&mut self, error: Error) {
        self.items.clear();
        self.error = Some(error);
    }

    /// Returns an owned copy of what consumers read.
    pub fn view(&self) -> PaginationView<T>
    where
        T: Clone,
    {
        PaginationView {
            items: self.items.to_vec(),
            loaded: self.loaded,
            loading_more: self.loading_more,
            has_more: self.has_more,
            error: self.error.clone(),
        }
    }

    /// Projects every visible document into its record.
    ///
    /// Missing documents project to `None`.
    pub fn values(&self, id_field: Option<&str>) -> Vec<Option<T>>
    where
        T: Clone + WithIdField,
    {
        self.items.iter().map(|doc| doc.to_data(id_field)).collect()
    }
}

/// Applies one action to an owned state.
pub fn reduce<T>(mut state: PaginationState<T>, action: Action<T>) -> PaginationState<T> {
    state.apply(action);
    state
}

/// Consumer-facing copy of the state.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationView<T> {
    pub items: Vec<Document<T>>,
    pub loaded: bool,
    pub loading_more: bool,
    pub has_more: bool,
    pub error: Option<Error>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use livepage_core::DocumentChange;

    fn doc(id: &str) -> Document<u32> {
        Document::new(format!("items/{id}"), 0)
    }

    fn ids(state: &PaginationState<u32>) -> Vec<&str> {
        state.items().iter().map(Document::id).collect()
    }

    fn loaded(window: &[&str], changes: Vec<DocumentChange<u32>>, step_limit: usize) -> Action<u32> {
        Action::Loaded {
            snapshot: Snapshot::new(window.iter().map(|id| doc(id)).collect(), changes),
            step_limit,
            edge: InsertionEdge::End,
        }
    }

    fn added(id: &str) -> DocumentChange<u32> {
        DocumentChange::added(doc(id))
    }

    #[test]
    fn test_initial_state() {
        let state: PaginationState<u32> = PaginationState::new();
        assert!(state.items().is_empty());
        assert_eq!(state.limit(), 0);
        assert!(!state.has_more());
        assert!(!state.loaded());
        assert!(!state.loading_more());
        assert!(state.error().is_none());
        assert_eq!(state.window_size(20), 20);
    }

    #[test]
    fn test_first_snapshot() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));

        assert_eq!(ids(&state), vec!["a", "b"]);
        assert_eq!(state.limit(), 4);
        assert!(state.loaded());
        assert!(state.has_more());
        assert_eq!(state.last_loaded().map(Document::id), Some("b"));
        assert_eq!(state.window_size(2), 4);
    }

    #[test]
    fn test_load_more_then_growth() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));

        state.apply(Action::LoadMore);
        assert!(state.loading_more());
        assert_eq!(state.after().map(DocumentKey::id), Some("b"));

        state.apply(loaded(&["a", "b", "c"], vec![added("c")], 2));
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
        assert_eq!(state.limit(), 5);
        assert!(state.has_more());
        assert!(!state.loading_more());
    }

    #[test]
    fn test_empty_batch_keeps_items() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));
        state.apply(loaded(&["a", "b", "c"], vec![added("c")], 2));

        state.apply(loaded(&["a", "b", "c"], vec![], 2));
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
        assert_eq!(state.limit(), 5);
        assert!(state.loaded());
        assert!(state.has_more());
        assert!(state.error().is_none());
        assert_eq!(state.last_loaded().map(Document::id), Some("c"));
    }

    #[test]
    fn test_short_window_reaches_end() {
        let names: Vec<String> = (0..15).map(|i| format!("{i}")).collect();
        let window: Vec<&str> = names.iter().map(String::as_str).collect();
        let changes = window.iter().map(|id| added(id)).collect();

        let mut state = PaginationState::new();
        state.apply(loaded(&window, changes, 20));

        assert_eq!(state.items().len(), 15);
        assert!(!state.has_more());
        assert_eq!(state.limit(), 35);
    }

    #[test]
    fn test_redelivery_without_growth_reaches_end() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));
        assert!(state.has_more());

        // Re-subscribed at limit 4 but the store only holds two documents.
        state.apply(Action::LoadMore);
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));

        assert_eq!(ids(&state), vec!["a", "b"]);
        assert_eq!(state.limit(), 4);
        assert!(!state.has_more());
    }

    #[test]
    fn test_edits_do_not_revise_has_more() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));
        assert!(state.has_more());

        state.apply(loaded(
            &["b"],
            vec![DocumentChange::removed(doc("a")), DocumentChange::modified(doc("b"))],
            2,
        ));
        assert_eq!(ids(&state), vec!["b"]);
        assert!(state.has_more());
        assert_eq!(state.limit(), 3);
    }

    #[test]
    fn test_start_edge() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a"], vec![added("a")], 1));
        state.apply(Action::Loaded {
            snapshot: Snapshot::new(vec![doc("b"), doc("a")], vec![added("b")]),
            step_limit: 1,
            edge: InsertionEdge::Start,
        });
        assert_eq!(ids(&state), vec!["b", "a"]);
    }

    #[test]
    fn test_error_clears_items_only() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));

        state.apply(Action::Error(Error::permission_denied("rules")));
        assert!(state.items().is_empty());
        assert_eq!(state.error(), Some(&Error::permission_denied("rules")));
        assert_eq!(state.limit(), 4);
        assert!(state.loaded());
        assert!(state.has_more());
    }

    #[test]
    fn test_snapshot_after_error_clears_error() {
        let mut state = PaginationState::new();
        state.apply(Action::Error(Error::unavailable("offline")));
        state.apply(loaded(&["a"], vec![added("a")], 2));

        assert!(state.error().is_none());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_reset() {
        let mut state = PaginationState::new();
        state.apply(loaded(&["a", "b"], vec![added("a"), added("b")], 2));
        state.apply(Action::LoadMore);

        let state = reduce(state, Action::Reset);
        assert_eq!(state, PaginationState::new());

        let again = reduce(state.clone(), Action::Reset);
        assert_eq!(again, state);
    }

    #[test]
    fn test_view_and_values() {
        let mut state: PaginationState<BTreeMap<String, String>> = PaginationState::new();
        state.apply(Action::Loaded {
            snapshot: Snapshot::initial(vec![
                Document::new("users/alice", Default::default()),
                Document::missing("users/ghost"),
            ]),
            step_limit: 20,
            edge: InsertionEdge::End,
        });

        let view = state.view();
        assert_eq!(view.items.len(), 2);
        assert!(view.loaded);
        assert!(!view.has_more);

        let values = state.values(Some("uid"));
        assert_eq!(
            values[0].as_ref().and_then(|v| v.get("uid")).map(String::as_str),
            Some("alice")
        );
        assert!(values[1].is_none());
    }
}
