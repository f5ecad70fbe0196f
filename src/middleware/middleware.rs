use std::fmt;
use std::sync::{Arc, RwLock};

use crate::compose::compose;
use crate::error::StoreError;
use crate::store::{Reducer, Store};

/// A dispatch function: submits an action and returns it once processed.
///
/// Middleware both receive one of these ("the next dispatch in the chain")
/// and produce one (their wrapping of it).
pub type Dispatch<A> = Arc<dyn Fn(A) -> Result<A, StoreError> + Send + Sync>;

/// One middleware's wrapping step: given the next dispatch in the chain,
/// yield the dispatch that stands in front of it.
pub type DispatchTransform<A> = Box<dyn FnOnce(Dispatch<A>) -> Dispatch<A>>;

/// A middleware: instantiated once with the shared [`StoreApi`] handle,
/// yielding its wrapping step.
pub type Middleware<S, A> = Box<dyn FnOnce(StoreApi<S, A>) -> DispatchTransform<A>>;

/// A store-construction function, as threaded through enhancers.
pub type StoreCreator<S, A> =
    Box<dyn FnOnce(Reducer<S, A>, Option<S>) -> Result<Store<S, A>, StoreError>>;

/// Augments store construction itself: takes the base creator and returns a
/// replacement with the same signature. [`apply_middleware`] is the
/// canonical enhancer; [`create_store`](crate::create_store) hands control
/// to one when given.
pub type Enhancer<S, A> = Box<dyn FnOnce(StoreCreator<S, A>) -> StoreCreator<S, A>>;

/// The capability handle every middleware receives.
///
/// Deliberately narrow: state reads and dispatch, nothing else. All
/// middleware of one pipeline share a single live view — `dispatch` here
/// always routes through the full chain currently in effect, so an action
/// dispatched from inside a middleware traverses every layer again from the
/// top.
pub struct StoreApi<S, A> {
    state: Arc<dyn Fn() -> Result<S, StoreError> + Send + Sync>,
    dispatch: Arc<dyn Fn(A) -> Result<A, StoreError> + Send + Sync>,
}

impl<S, A> StoreApi<S, A> {
    pub(crate) fn new(
        state: Arc<dyn Fn() -> Result<S, StoreError> + Send + Sync>,
        dispatch: Arc<dyn Fn(A) -> Result<A, StoreError> + Send + Sync>,
    ) -> Self {
        Self { state, dispatch }
    }

    /// A clone of the store's current state.
    pub fn state(&self) -> Result<S, StoreError> {
        (self.state)()
    }

    /// Dispatch through the full middleware chain currently in effect.
    ///
    /// Fails with [`StoreError::PipelineAssembling`] when called while the
    /// pipeline is still being constructed: the action would silently
    /// bypass the middleware not yet instantiated.
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        (self.dispatch)(action)
    }
}

impl<S, A> Clone for StoreApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

/// Build an enhancer that installs a middleware pipeline.
///
/// The first middleware in the list becomes the outermost wrapper: it sees
/// every dispatched action first and whatever the rest of the chain
/// returned last. The last middleware calls the store's own transition.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pawl::{apply_middleware, create_store, Dispatch, Middleware, StoreAction};
///
/// #[derive(Debug)]
/// struct Add(i32);
///
/// // Double every payload before it reaches the reducer.
/// let doubler: Middleware<i32, Add> = Box::new(|_api| {
///     Box::new(|next: Dispatch<Add>| {
///         Arc::new(move |action: Add| next(Add(action.0 * 2)))
///     })
/// });
///
/// let store = create_store(
///     |state: Option<i32>, action: StoreAction<&Add>| match action {
///         StoreAction::Action(Add(value)) => state.unwrap_or(0) + value,
///         _ => state.unwrap_or(0),
///     },
///     None,
///     Some(apply_middleware(vec![doubler])),
/// )?;
///
/// store.dispatch(Add(5))?;
/// assert_eq!(store.state()?, 10);
/// # Ok::<(), pawl::StoreError>(())
/// ```
pub fn apply_middleware<S, A>(middleware: Vec<Middleware<S, A>>) -> Enhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: fmt::Debug + 'static,
{
    Box::new(move |create| {
        Box::new(move |reducer, preloaded| {
            let store = create(reducer, preloaded)?;

            // Until the chain below is assembled, a dispatch coming through
            // the shared handle is a construction-ordering violation.
            let placeholder: Dispatch<A> = Arc::new(|_| Err(StoreError::PipelineAssembling));
            let cell = Arc::new(RwLock::new(placeholder));

            let api = StoreApi::new(
                {
                    let store = store.clone();
                    Arc::new(move || store.state())
                },
                {
                    let cell = Arc::clone(&cell);
                    Arc::new(move |action| {
                        let dispatch = cell.read().unwrap().clone();
                        dispatch(action)
                    })
                },
            );

            let transforms: Vec<DispatchTransform<A>> =
                middleware.into_iter().map(|m| m(api.clone())).collect();
            log::debug!("installing {} middleware", transforms.len());

            let base: Dispatch<A> = {
                let store = store.clone();
                Arc::new(move |action| store.dispatch(action))
            };
            let dispatch = compose(transforms)(base);
            *cell.write().unwrap() = Arc::clone(&dispatch);

            Ok(store.with_dispatch(cell))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_store, StoreAction};
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tally {
        Add(i32),
        Poke,
    }

    fn tally(state: Option<i32>, action: StoreAction<&Tally>) -> i32 {
        let state = state.unwrap_or(0);
        match action {
            StoreAction::Action(Tally::Add(value)) => state + value,
            _ => state,
        }
    }

    fn tracing_middleware(name: &'static str, trace: Arc<Mutex<Vec<String>>>) -> Middleware<i32, Tally> {
        Box::new(move |_api| {
            Box::new(move |next: Dispatch<Tally>| {
                Arc::new(move |action| {
                    trace.lock().unwrap().push(format!("{name}:in"));
                    let result = next(action);
                    trace.lock().unwrap().push(format!("{name}:out"));
                    result
                })
            })
        })
    }

    #[test]
    fn first_listed_middleware_is_outermost() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let enhancer = apply_middleware(vec![
            tracing_middleware("a", trace.clone()),
            tracing_middleware("b", trace.clone()),
        ]);

        let store = create_store(tally, None, Some(enhancer)).unwrap();
        store.dispatch(Tally::Add(1)).unwrap();

        assert_eq!(
            *trace.lock().unwrap(),
            vec!["a:in", "b:in", "b:out", "a:out"]
        );
    }

    #[test]
    fn middleware_can_rewrite_actions() {
        let doubler: Middleware<i32, Tally> = Box::new(|_api| {
            Box::new(|next: Dispatch<Tally>| {
                Arc::new(move |action| match action {
                    Tally::Add(value) => next(Tally::Add(value * 2)),
                    other => next(other),
                })
            })
        });

        let store = create_store(tally, None, Some(apply_middleware(vec![doubler]))).unwrap();

        // The rewritten action is what the reducer saw and what dispatch
        // hands back.
        let returned = store.dispatch(Tally::Add(5)).unwrap();
        assert_eq!(returned, Tally::Add(10));
        assert_eq!(store.state().unwrap(), 10);
    }

    #[test]
    fn dispatch_during_assembly_is_rejected() {
        let early: Arc<Mutex<Option<Result<Tally, StoreError>>>> = Arc::new(Mutex::new(None));

        let early_clone = early.clone();
        let eager: Middleware<i32, Tally> = Box::new(move |api| {
            *early_clone.lock().unwrap() = Some(api.dispatch(Tally::Add(1)));
            Box::new(|next: Dispatch<Tally>| next)
        });

        let store = create_store(tally, None, Some(apply_middleware(vec![eager]))).unwrap();

        assert_eq!(
            early.lock().unwrap().take().unwrap(),
            Err(StoreError::PipelineAssembling)
        );
        // The rejected early dispatch left no trace.
        assert_eq!(store.state().unwrap(), 0);

        store.dispatch(Tally::Add(3)).unwrap();
        assert_eq!(store.state().unwrap(), 3);
    }

    #[test]
    fn api_reads_state_at_dispatch_time() {
        let seen: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        let reader: Middleware<i32, Tally> = Box::new(move |api| {
            Box::new(move |next: Dispatch<Tally>| {
                Arc::new(move |action| {
                    let result = next(action);
                    seen_clone.lock().unwrap().push(api.state().unwrap());
                    result
                })
            })
        });

        let store = create_store(tally, None, Some(apply_middleware(vec![reader]))).unwrap();
        store.dispatch(Tally::Add(2)).unwrap();
        store.dispatch(Tally::Add(3)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![2, 5]);
    }

    #[test]
    fn api_dispatch_traverses_the_full_chain() {
        let entries = Arc::new(Mutex::new(Vec::new()));

        let entries_clone = entries.clone();
        let splitter: Middleware<i32, Tally> = Box::new(move |api| {
            Box::new(move |next: Dispatch<Tally>| {
                Arc::new(move |action| {
                    entries_clone.lock().unwrap().push(format!("{action:?}"));
                    if let Tally::Poke = action {
                        // Re-enter from the top; the follow-up is recorded
                        // by this same middleware before the poke proceeds.
                        api.dispatch(Tally::Add(7))?;
                    }
                    next(action)
                })
            })
        });

        let store = create_store(tally, None, Some(apply_middleware(vec![splitter]))).unwrap();
        store.dispatch(Tally::Poke).unwrap();

        assert_eq!(*entries.lock().unwrap(), vec!["Poke", "Add(7)"]);
        assert_eq!(store.state().unwrap(), 7);
    }

    #[test]
    fn empty_pipeline_behaves_like_plain_store() {
        let store = create_store(tally, Some(5), Some(apply_middleware(vec![]))).unwrap();
        store.dispatch(Tally::Add(4)).unwrap();
        assert_eq!(store.state().unwrap(), 9);
    }
}
