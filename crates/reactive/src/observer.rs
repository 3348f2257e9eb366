//! State observers.
//!
//! Observers are the consumer's re-render hook. The registry only stores
//! them; callbacks are run from a copy of the callback list, so an observer
//! may register, remove or call into its controller while being notified.

use crate::state::PaginationState;
use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Unique identifier for an observer.
pub type ObserverId = u64;

/// Callback type for state notifications.
pub type StateCallback<T> = Rc<dyn Fn(&PaginationState<T>)>;

/// Observers registered on one controller.
pub struct ObserverRegistry<T> {
    callbacks: HashMap<ObserverId, StateCallback<T>>,
    next_id: ObserverId,
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObserverRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Registers a callback and returns its id.
    pub fn observe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&PaginationState<T>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.insert(id, Rc::new(callback));
        id
    }

    /// Removes an observer.
    ///
    /// Returns true if the observer was found and removed.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    /// Returns the registered callbacks in registration order.
    pub fn callbacks(&self) -> Vec<StateCallback<T>> {
        let mut entries: Vec<_> = self.callbacks.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| **id);
        entries.into_iter().map(|(_, callback)| Rc::clone(callback)).collect()
    }
}

/// Runs each callback against `state`.
pub fn notify_all<T>(callbacks: &[StateCallback<T>], state: &PaginationState<T>) {
    for callback in callbacks {
        callback(state);
    }
}
