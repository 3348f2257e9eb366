//! Subscription controller.
//!
//! `PaginationController` keeps exactly one live subscription open for the
//! current query and routes its deliveries into the reducer. Growing the
//! window is done by closing the subscription and re-opening it with a larger
//! limit; no cursor is ever sent to the transport.

use crate::identity::QueryRef;
use crate::observer::ObserverId;
use crate::state::{Action, PaginationState, PaginationView};
use crate::subscription::{dispatch, Generation, Listener, Shared};
use crate::transport::Transport;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use livepage_core::{PaginationOptions, QueryDescriptor, WithIdField};
use tracing::{debug, warn};

/// The subscription currently open on the transport.
struct ActiveSubscription<H> {
    handle: H,
    generation: Generation,
    window: usize,
}

/// Paginated live query over a transport.
///
/// # Example
///
/// ```ignore
/// let mut pages = PaginationController::new(transport, PaginationOptions::new().with_step_limit(10));
/// pages.observe(|state| render(state.items()));
///
/// pages.set_query(Some(messages_in("lobby")));
/// // ... transport delivers the first ten messages ...
/// pages.load_more();
/// ```
pub struct PaginationController<Q, T, Tr: Transport<Q, T>> {
    transport: Tr,
    options: PaginationOptions<Tr::Options>,
    query: QueryRef<Q>,
    active: Option<ActiveSubscription<Tr::Handle>>,
    shared: Rc<RefCell<Shared<T>>>,
}

impl<Q, T, Tr: Transport<Q, T>> PaginationController<Q, T, Tr> {
    /// Creates a controller with no query and no subscription.
    pub fn new(transport: Tr, options: PaginationOptions<Tr::Options>) -> Self {
        Self {
            transport,
            options,
            query: QueryRef::new(),
            active: None,
            shared: Rc::new(RefCell::new(Shared::new())),
        }
    }

    /// Returns the configured options.
    #[inline]
    pub fn options(&self) -> &PaginationOptions<Tr::Options> {
        &self.options
    }

    /// Returns the current query descriptor.
    #[inline]
    pub fn query(&self) -> Option<&Q> {
        self.query.current()
    }

    /// Returns the transport.
    #[inline]
    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Returns the transport mutably.
    #[inline]
    pub fn transport_mut(&mut self) -> &mut Tr {
        &mut self.transport
    }

    /// Returns the growth step in effect.
    #[inline]
    pub fn step_limit(&self) -> usize {
        self.options.effective_step_limit()
    }

    /// Returns the window the next subscription would request.
    pub fn window_size(&self) -> usize {
        self.shared.borrow().state.window_size(self.step_limit())
    }

    /// Returns true if a subscription is open.
    #[inline]
    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the window of the open subscription.
    pub fn subscribed_window(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.window)
    }

    /// Borrows the current state.
    pub fn state(&self) -> Ref<'_, PaginationState<T>> {
        Ref::map(self.shared.borrow(), |shared| &*shared.state)
    }

    /// Returns an owned copy of what consumers read.
    pub fn view(&self) -> PaginationView<T>
    where
        T: Clone,
    {
        self.shared.borrow().state.view()
    }

    /// Projects the visible documents using the configured id field.
    pub fn values(&self) -> Vec<Option<T>>
    where
        T: Clone + WithIdField,
    {
        self.shared
            .borrow()
            .state
            .values(self.options.id_field.as_deref())
    }

    /// Registers a callback invoked after every state transition.
    pub fn observe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&PaginationState<T>) + 'static,
    {
        self.shared.borrow_mut().observers.observe(callback)
    }

    /// Removes an observer.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.shared.borrow_mut().observers.unobserve(id)
    }

    /// Closes the subscription and keeps the state.
    ///
    /// `load_more` does nothing while detached; `reset` or a new query
    /// re-attaches.
    pub fn detach(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        // Retire the generation first so nothing from the old subscription
        // reaches the reducer, even if the transport delivers during close.
        self.shared.borrow_mut().end();
        if let Some(active) = self.active.take() {
            debug!(generation = active.generation, window = active.window, "closing live subscription");
            self.transport.close(active.handle);
        }
    }
}

impl<Q, T: Clone, Tr: Transport<Q, T>> PaginationController<Q, T, Tr> {
    /// Requests one more step of documents.
    ///
    /// Marks the state as loading and re-opens the subscription with the grown
    /// window. A request that would not grow the window only re-marks the
    /// state and keeps the open subscription. Ignored when no subscription is
    /// open.
    pub fn load_more(&mut self) {
        if !self.is_subscribed() {
            debug!(query = self.query.is_some(), "load_more without a subscription, ignoring");
            return;
        }
        dispatch(&self.shared, Action::LoadMore);
        let window = self.window_size();
        if self.subscribed_window() == Some(window) {
            debug!(window, "window unchanged, keeping subscription");
            return;
        }
        self.close();
        self.open(window);
    }

    /// Returns to the initial state and re-opens the subscription at one step.
    ///
    /// This is the retry path after a subscription error.
    pub fn reset(&mut self) {
        dispatch(&self.shared, Action::Reset);
        self.close();
        let window = self.step_limit();
        self.open(window);
    }

    fn open(&mut self, window: usize) {
        let Some(query) = self.query.current() else {
            return;
        };
        let generation = self.shared.borrow_mut().begin();
        let listener = Listener::new(
            Rc::downgrade(&self.shared),
            generation,
            self.options.effective_step_limit(),
            self.options.insertion_edge,
        );

        debug!(generation, window, "opening live subscription");
        match self
            .transport
            .subscribe(query, window, &self.options.listen_options, listener)
        {
            Ok(handle) => {
                self.active = Some(ActiveSubscription {
                    handle,
                    generation,
                    window,
                });
            }
            Err(error) => {
                warn!(generation, %error, "subscribe failed");
                self.shared.borrow_mut().end();
                dispatch(&self.shared, Action::Error(error));
            }
        }
    }
}

impl<Q: QueryDescriptor, T: Clone, Tr: Transport<Q, T>> PaginationController<Q, T, Tr> {
    /// Supplies the query for this round.
    ///
    /// An equivalent descriptor is a no-op. A different one resets the state,
    /// closes the old subscription and opens a new one at one step; `None`
    /// leaves the controller idle.
    pub fn set_query(&mut self, query: Option<Q>) {
        if !self.query.update(query) {
            return;
        }
        debug!(present = self.query.is_some(), "query identity changed");
        dispatch(&self.shared, Action::Reset);
        self.close();
        let window = self.step_limit();
        self.open(window);
    }
}

impl<Q, T, Tr: Transport<Q, T>> Drop for PaginationController<Q, T, Tr> {
    fn drop(&mut self) {
        self.close();
    }
}
