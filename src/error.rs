//! Error taxonomy for contract violations.
//!
//! Every failure in this crate is a synchronous, descriptive error returned
//! to the offending caller. Nothing is caught internally and nothing is
//! retried: these are programming-contract violations, not recoverable
//! faults.

use thiserror::Error;

/// Errors raised by [`Store`](crate::Store) operations and the middleware
/// pipeline.
///
/// All variants describe an invalid call context. Invalid-argument failures
/// of comparable dynamically-typed containers (a non-callable reducer, an
/// action without a discriminant) cannot be expressed through this crate's
/// API and therefore have no variants here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `dispatch` was called while a reducer was already executing.
    ///
    /// Reducers must be pure; a reducer that dispatches would start a
    /// nested transition against the state it is currently computing.
    #[error("cannot dispatch while the reducer is executing")]
    DispatchInReducer,

    /// State was read while a reducer was executing.
    ///
    /// The reducer already receives the current state as an argument; pass
    /// it down from there instead of reading it back out of the store.
    #[error("cannot read state while the reducer is executing; the reducer already receives the state as an argument")]
    ReadInReducer,

    /// A listener was registered while a reducer was executing.
    #[error("cannot subscribe while the reducer is executing")]
    SubscribeInReducer,

    /// A listener was removed while a reducer was executing.
    #[error("cannot unsubscribe while the reducer is executing")]
    UnsubscribeInReducer,

    /// `dispatch` was called from a middleware that was still being
    /// constructed.
    ///
    /// Dispatching before the pipeline is fully assembled would route the
    /// action past the middleware that have not been instantiated yet.
    #[error("cannot dispatch while the middleware pipeline is being assembled")]
    PipelineAssembling,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_descriptive() {
        let message = StoreError::ReadInReducer.to_string();
        assert!(message.contains("reducer"));

        let message = StoreError::PipelineAssembling.to_string();
        assert!(message.contains("middleware"));
    }
}
