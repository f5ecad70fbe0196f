//! # Pawl
//!
//! A predictable, synchronous state container for Rust.
//!
//! Pawl keeps all application state in a single [`Store`], where it can
//! only move forward one transition at a time:
//!
//! ## Store (state container)
//!
//! - A pure reducer `(Option<State>, StoreAction<&Action>) -> State` is the
//!   only way state changes
//! - [`Store::dispatch`] runs the reducer and synchronously notifies
//!   subscribers
//! - [`Store::subscribe`] registers listeners; [`Observable`] delivers
//!   state snapshots to reactive-stream observers
//! - Reentrant access during a transition is rejected, never serialized
//!
//! ## Middleware (extension mechanism)
//!
//! - [`apply_middleware`] builds an enhancer that wraps dispatch in layers,
//!   first-listed middleware outermost
//! - [`compose`] is the underlying right-to-left composition primitive
//! - Middleware see a narrow [`StoreApi`] capability handle: state reads
//!   and dispatch, nothing else

pub mod bind;
pub mod compose;
pub mod error;
pub mod middleware;
pub mod store;

// Re-export main types for convenience
pub use bind::bind_action_creator;
pub use compose::{compose, Composed};
pub use error::StoreError;
pub use middleware::{
    apply_middleware, Dispatch, DispatchTransform, Enhancer, Middleware, StoreApi, StoreCreator,
};
pub use store::{create_store, Observable, Reducer, Store, StoreAction, Subscription};
