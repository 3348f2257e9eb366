//! Live subscription bookkeeping.
//!
//! Every subscription a controller opens is tagged with a fresh generation.
//! Only the live generation may reach the reducer; a `Listener` left over from
//! a closed subscription has its deliveries discarded, so a late callback can
//! never merge stale documents into a reset state.

use crate::observer::{notify_all, ObserverRegistry};
use crate::state::{Action, PaginationState};
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use livepage_core::{Error, InsertionEdge, Snapshot};
use tracing::{debug, warn};

/// Sequence number of a subscription within one controller.
pub type Generation = u64;

/// State shared between a controller and the listeners it hands out.
///
/// The state sits behind an `Rc` so observers can be run against it with no
/// borrow of the cell held. A transition made while a notification round still
/// holds the previous state copies it first.
pub(crate) struct Shared<T> {
    pub(crate) state: Rc<PaginationState<T>>,
    pub(crate) observers: ObserverRegistry<T>,
    live: Option<Generation>,
    next_generation: Generation,
    /// A notification round is running
    notifying: bool,
    /// The state changed during the running round
    stale: bool,
}

impl<T> Shared<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(PaginationState::new()),
            observers: ObserverRegistry::new(),
            live: None,
            next_generation: 1,
            notifying: false,
            stale: false,
        }
    }

    /// Starts a new generation, retiring the previous one.
    pub(crate) fn begin(&mut self) -> Generation {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.live = Some(generation);
        generation
    }

    /// Retires the live generation, if any.
    pub(crate) fn end(&mut self) -> Option<Generation> {
        self.live.take()
    }

    /// Returns the live generation.
    #[inline]
    pub(crate) fn live(&self) -> Option<Generation> {
        self.live
    }
}

impl<T: Clone> Shared<T> {
    pub(crate) fn apply(&mut self, action: Action<T>) {
        Rc::make_mut(&mut self.state).apply(action);
    }
}

/// Applies an action and notifies observers.
pub(crate) fn dispatch<T: Clone>(shared: &RefCell<Shared<T>>, action: Action<T>) {
    shared.borrow_mut().apply(action);
    notify(shared);
}

/// Runs every observer against the current state.
///
/// No borrow is held while a callback runs, so an observer may call back into
/// its controller. Transitions it causes are not notified recursively: the
/// running round repeats with the latest state once every observer has seen
/// the current one.
pub(crate) fn notify<T>(shared: &RefCell<Shared<T>>) {
    {
        let mut inner = shared.borrow_mut();
        if inner.notifying {
            inner.stale = true;
            return;
        }
        inner.notifying = true;
    }
    loop {
        let (state, callbacks) = {
            let mut inner = shared.borrow_mut();
            inner.stale = false;
            (Rc::clone(&inner.state), inner.observers.callbacks())
        };
        notify_all(&callbacks, &state);

        let mut inner = shared.borrow_mut();
        if !inner.stale {
            inner.notifying = false;
            return;
        }
    }
}

/// Callback sink handed to a transport for one subscription.
///
/// Deliveries return true when they reached the reducer. They are discarded
/// once the subscription is closed or the controller is gone, and while the
/// caller holds a borrow of the controller's state.
pub struct Listener<T> {
    shared: Weak<RefCell<Shared<T>>>,
    generation: Generation,
    step_limit: usize,
    edge: InsertionEdge,
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            generation: self.generation,
            step_limit: self.step_limit,
            edge: self.edge,
        }
    }
}

impl<T> Listener<T> {
    pub(crate) fn new(
        shared: Weak<RefCell<Shared<T>>>,
        generation: Generation,
        step_limit: usize,
        edge: InsertionEdge,
    ) -> Self {
        Self {
            shared,
            generation,
            step_limit,
            edge,
        }
    }

    /// Returns the generation this listener belongs to.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns true if deliveries would currently reach the reducer.
    pub fn is_live(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let live = match shared.try_borrow() {
            Ok(inner) => inner.live(),
            Err(_) => None,
        };
        live == Some(self.generation)
    }
}

impl<T: Clone> Listener<T> {
    /// Delivers a snapshot.
    pub fn on_snapshot(&self, snapshot: Snapshot<T>) -> bool {
        self.deliver(Action::Loaded {
            snapshot,
            step_limit: self.step_limit,
            edge: self.edge,
        })
    }

    /// Delivers a subscription failure.
    pub fn on_error(&self, error: Error) -> bool {
        self.deliver(Action::Error(error))
    }

    fn deliver(&self, action: Action<T>) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            debug!(generation = self.generation, "controller gone, discarding delivery");
            return false;
        };
        {
            let Ok(mut inner) = shared.try_borrow_mut() else {
                warn!(
                    generation = self.generation,
                    "delivery made while state is borrowed, discarding"
                );
                return false;
            };
            if inner.live() != Some(self.generation) {
                debug!(
                    generation = self.generation,
                    live = ?inner.live(),
                    "subscription closed, discarding delivery"
                );
                return false;
            }
            inner.apply(action);
        }
        notify(&shared);
        true
    }
}
