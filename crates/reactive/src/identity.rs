//! Query identity tracking.
//!
//! The controller restarts its live subscription only when the caller hands
//! it a query that is logically different from the previous one. Callers are
//! free to rebuild an equivalent descriptor on every call.

use livepage_core::QueryDescriptor;

/// Returns true if both descriptors denote the same live query.
///
/// Two absent descriptors are equal; a present and an absent one never are.
pub fn is_same_query<Q: QueryDescriptor>(prev: Option<&Q>, next: Option<&Q>) -> bool {
    match (prev, next) {
        (None, None) => true,
        (Some(prev), Some(next)) => prev.is_equal(next),
        _ => false,
    }
}

/// Holds the current query descriptor, replacing it only on identity change.
#[derive(Clone, Debug)]
pub struct QueryRef<Q> {
    current: Option<Q>,
}

impl<Q> Default for QueryRef<Q> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<Q> QueryRef<Q> {
    /// Creates an empty reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current descriptor.
    #[inline]
    pub fn current(&self) -> Option<&Q> {
        self.current.as_ref()
    }

    /// Returns true if a descriptor is held.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.current.is_some()
    }
}

impl<Q: QueryDescriptor> QueryRef<Q> {
    /// Offers the latest descriptor.
    ///
    /// Returns true if it denotes a different query, in which case it becomes
    /// current. An equivalent descriptor is dropped and the held one is kept.
    pub fn update(&mut self, next: Option<Q>) -> bool {
        if is_same_query(self.current.as_ref(), next.as_ref()) {
            return false;
        }
        self.current = next;
        true
    }
}
