//! The state container.
//!
//! A [`Store`] owns one state value, the reducer that transforms it, and the
//! listeners notified after every transition. This module also carries the
//! [`Subscription`] handle and the [`Observable`] reactive-stream interop.

mod observe;
mod store;
mod subscription;

pub use observe::Observable;
pub use store::{create_store, Reducer, Store, StoreAction};
pub use subscription::Subscription;
