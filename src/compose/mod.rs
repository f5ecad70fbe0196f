//! Right-to-left function composition.
//!
//! The composition primitive used by the middleware pipeline to collapse an
//! ordered list of dispatch wrappers into a single wrapper.

mod compose;

pub use compose::{compose, Composed};
