use std::fmt;

use crate::error::StoreError;

use super::store::Store;
use super::subscription::Subscription;

/// Minimal reactive-stream interop.
///
/// The discovery point for adapters to external reactive libraries: an
/// observer receives the current value immediately and again after every
/// subsequent transition. Built purely on subscription and state reads, so
/// it adds no invariants of its own.
pub trait Observable {
    /// The value delivered to observers.
    type State;

    /// Deliver the current state to `observer` once, then after every
    /// transition until the returned handle is unsubscribed.
    fn observe<F>(&self, observer: F) -> Result<Subscription, StoreError>
    where
        F: Fn(&Self::State) + Send + Sync + 'static;
}

impl<S, A> Observable for Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: fmt::Debug + 'static,
{
    type State = S;

    fn observe<F>(&self, observer: F) -> Result<Subscription, StoreError>
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.read(|state| observer(state))?;
        self.subscribe_with_state(observer)
    }
}
