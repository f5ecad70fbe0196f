//! Middleware pipeline and the enhancer protocol.
//!
//! Middleware wrap the store's dispatch in layers: the first middleware in
//! the list sees every action first on the way in and last on the way out,
//! and the last one calls the store's own transition directly.

mod middleware;

pub use middleware::{
    apply_middleware, Dispatch, DispatchTransform, Enhancer, Middleware, StoreApi, StoreCreator,
};
