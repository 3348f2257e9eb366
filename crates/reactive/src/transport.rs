//! Transport boundary.

use crate::subscription::Listener;
use livepage_core::Result;

/// Opens and closes live subscriptions on the remote store.
///
/// A subscription delivers snapshots of the first `window` results of
/// `query` to `listener` until it is closed. Implementations may deliver
/// synchronously from inside `subscribe`. After `close`, further deliveries
/// through the listener are discarded by the engine, so a transport that
/// races a final callback past `close` is harmless.
pub trait Transport<Q, T> {
    /// Listen options passed through untouched on every subscribe.
    type Options;
    /// Handle identifying one open subscription.
    type Handle;

    /// Opens a live subscription.
    fn subscribe(
        &mut self,
        query: &Q,
        window: usize,
        options: &Self::Options,
        listener: Listener<T>,
    ) -> Result<Self::Handle>;

    /// Closes a subscription.
    fn close(&mut self, handle: Self::Handle);
}
