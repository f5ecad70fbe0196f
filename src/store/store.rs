use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::StoreError;
use crate::middleware::{Dispatch, Enhancer, StoreCreator};

use super::subscription::{ListenerSet, Subscription};

/// The envelope a reducer receives on every transition.
///
/// `Init` and `Replace` are the store's two reserved internal actions:
/// `Init` runs exactly once during construction, `Replace` runs when the
/// active reducer is swapped via
/// [`replace_reducer`](Store::replace_reducer). They cannot be forged from
/// the outside, since [`dispatch`](Store::dispatch) only accepts the
/// application action type. A reducer must return a valid state for all
/// three variants; unrecognized application actions return the input state
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction<A> {
    /// Raised once while the store is being constructed.
    Init,
    /// Raised immediately after the reducer has been replaced.
    Replace,
    /// An application action submitted through [`Store::dispatch`].
    Action(A),
}

impl<A> StoreAction<A> {
    /// The application action, if this is not an internal transition.
    pub fn action(&self) -> Option<&A> {
        match self {
            Self::Action(action) => Some(action),
            _ => None,
        }
    }
}

/// A pure state-transition function.
///
/// Receives `None` as the state exactly once, for the `Init` transition of
/// a store constructed without preloaded state; from then on the current
/// state is always present. The action is borrowed so the store can hand it
/// back to the dispatching caller afterwards.
pub type Reducer<S, A> = Arc<dyn Fn(Option<S>, StoreAction<&A>) -> S + Send + Sync>;

/// Clears the dispatching flag when dropped, including while unwinding out
/// of a panicking reducer, so the store stays usable afterwards.
struct ReduceGuard<'a>(&'a AtomicBool);

impl Drop for ReduceGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct StoreInner<S, A> {
    state: RwLock<S>,
    reducer: RwLock<Reducer<S, A>>,
    listeners: Arc<Mutex<ListenerSet>>,
    reducing: Arc<AtomicBool>,
}

/// A synchronous state container.
///
/// Holds a single state value that only a reducer may transform. Every
/// [`dispatch`](Store::dispatch) runs the reducer, replaces the state with
/// its return value, and synchronously notifies the listeners that were
/// registered before the transition began.
///
/// `Store` is a cheap handle over shared internals: clones observe and
/// mutate the same state. An enhanced handle produced by
/// [`apply_middleware`](crate::apply_middleware) additionally carries the
/// augmented dispatch chain; all other operations are untouched.
///
/// # Example
///
/// ```
/// use pawl::{Store, StoreAction};
///
/// #[derive(Debug)]
/// enum Counter {
///     Inc,
///     Dec,
/// }
///
/// let store = Store::new(|state: Option<i32>, action: StoreAction<&Counter>| {
///     let state = state.unwrap_or(0);
///     match action {
///         StoreAction::Action(Counter::Inc) => state + 1,
///         StoreAction::Action(Counter::Dec) => state - 1,
///         _ => state,
///     }
/// });
///
/// store.dispatch(Counter::Inc)?;
/// store.dispatch(Counter::Inc)?;
/// assert_eq!(store.state()?, 2);
/// # Ok::<(), pawl::StoreError>(())
/// ```
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
    enhanced: Option<Arc<RwLock<Dispatch<A>>>>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: fmt::Debug + 'static,
{
    /// Create a store whose initial state is established by the reducer's
    /// handling of [`StoreAction::Init`].
    pub fn new<R>(reducer: R) -> Self
    where
        R: Fn(Option<S>, StoreAction<&A>) -> S + Send + Sync + 'static,
    {
        Self::construct(Arc::new(reducer), None)
    }

    /// Create a store with preloaded state, handed to the reducer's `Init`
    /// transition in place of the absent-state sentinel.
    pub fn with_preloaded<R>(reducer: R, preloaded: S) -> Self
    where
        R: Fn(Option<S>, StoreAction<&A>) -> S + Send + Sync + 'static,
    {
        Self::construct(Arc::new(reducer), Some(preloaded))
    }

    pub(crate) fn construct(reducer: Reducer<S, A>, preloaded: Option<S>) -> Self {
        // The one internal Init transition. No handle exists yet, so no
        // listeners can observe it and the dispatching flag is untouched.
        let initial = reducer(preloaded, StoreAction::Init);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial),
                reducer: RwLock::new(reducer),
                listeners: Arc::new(Mutex::new(ListenerSet::new())),
                reducing: Arc::new(AtomicBool::new(false)),
            }),
            enhanced: None,
        }
    }

    /// A clone of the current state.
    ///
    /// Fails with [`StoreError::ReadInReducer`] while a transition's
    /// reducer is executing: the reducer already receives the state as an
    /// argument and must not read it back out of the store.
    pub fn state(&self) -> Result<S, StoreError> {
        if self.inner.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::ReadInReducer);
        }
        Ok(self.inner.state.read().unwrap().clone())
    }

    /// Read the current state through a closure, without cloning.
    ///
    /// Same call-context contract as [`state`](Store::state).
    pub fn read<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&S) -> R,
    {
        if self.inner.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::ReadInReducer);
        }
        let state = self.inner.state.read().unwrap();
        Ok(f(&state))
    }

    /// Register a listener invoked after every completed transition.
    ///
    /// Listeners take no arguments; they read the store to observe the new
    /// state. A listener registered from inside another listener's
    /// notification is first invoked on the *next* transition. Fails with
    /// [`StoreError::SubscribeInReducer`] while the reducer is executing.
    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription, StoreError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.inner.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::SubscribeInReducer);
        }
        let id = self
            .inner
            .listeners
            .lock()
            .unwrap()
            .insert(Arc::new(listener));
        Ok(Subscription::new(
            id,
            Arc::downgrade(&self.inner.listeners),
            Arc::downgrade(&self.inner.reducing),
        ))
    }

    /// Register a listener that receives a borrow of the state after every
    /// transition. Used by the [`Observable`](super::Observable) interop.
    pub(crate) fn subscribe_with_state<F>(&self, listener: F) -> Result<Subscription, StoreError>
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(&self.inner);
        self.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                let state = inner.state.read().unwrap();
                listener(&state);
            }
        })
    }

    /// Submit an action for synchronous processing.
    ///
    /// Runs the reducer, stores its result, notifies the listener snapshot
    /// in registration order, and returns the action unchanged. On an
    /// enhanced store the action first traverses the middleware chain.
    ///
    /// Fails with [`StoreError::DispatchInReducer`] if a transition is
    /// already in progress. If the reducer panics, the flag is cleared, the
    /// state is left untouched, no listener is notified, and the panic
    /// propagates to the caller.
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        match &self.enhanced {
            Some(cell) => {
                let dispatch = cell.read().unwrap().clone();
                dispatch(action)
            }
            None => self.dispatch_base(action),
        }
    }

    /// The unaugmented transition operation middleware chains bottom out in.
    pub(crate) fn dispatch_base(&self, action: A) -> Result<A, StoreError> {
        log::trace!("dispatching {action:?}");
        self.transition(StoreAction::Action(&action))?;
        Ok(action)
    }

    /// Swap the active reducer, keeping all subscribers, then immediately
    /// run a [`StoreAction::Replace`] transition so the new reducer
    /// re-establishes its state without any caller-side dispatch.
    pub fn replace_reducer<R>(&self, next: R) -> Result<(), StoreError>
    where
        R: Fn(Option<S>, StoreAction<&A>) -> S + Send + Sync + 'static,
    {
        if self.inner.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::DispatchInReducer);
        }
        *self.inner.reducer.write().unwrap() = Arc::new(next);
        log::debug!("reducer replaced");
        self.transition(StoreAction::Replace)
    }

    fn transition(&self, action: StoreAction<&A>) -> Result<(), StoreError> {
        if self.inner.reducing.swap(true, Ordering::SeqCst) {
            return Err(StoreError::DispatchInReducer);
        }
        let next = {
            let _guard = ReduceGuard(&self.inner.reducing);
            let current = self.inner.state.read().unwrap().clone();
            let reducer = Arc::clone(&*self.inner.reducer.read().unwrap());
            // No lock is held across the reducer call; a panic here cannot
            // poison the store.
            reducer(Some(current), action)
        };
        *self.inner.state.write().unwrap() = next;

        // Snapshot taken after the state write: subscribes and unsubscribes
        // from inside a callback only affect the next transition.
        let snapshot = self.inner.listeners.lock().unwrap().snapshot();
        log::trace!("notifying {} listener(s)", snapshot.len());
        for (_, listener) in snapshot.iter() {
            listener();
        }
        Ok(())
    }

    pub(crate) fn with_dispatch(&self, dispatch: Arc<RwLock<Dispatch<A>>>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            enhanced: Some(dispatch),
        }
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            enhanced: self.enhanced.clone(),
        }
    }
}

/// Create a store, optionally routing construction through an enhancer.
///
/// The plain entry points [`Store::new`] and [`Store::with_preloaded`]
/// cover the unenhanced cases; this function exists for the enhancer
/// protocol: when one is given, control is handed to
/// `enhancer(base_creator)` and the creator it returns builds the store.
///
/// # Example
///
/// ```
/// use pawl::{apply_middleware, create_store, StoreAction};
///
/// #[derive(Debug)]
/// struct Tick;
///
/// let store = create_store(
///     |state: Option<u32>, action: StoreAction<&Tick>| match action {
///         StoreAction::Action(Tick) => state.unwrap_or(0) + 1,
///         _ => state.unwrap_or(0),
///     },
///     None,
///     Some(apply_middleware(vec![])),
/// )?;
///
/// store.dispatch(Tick)?;
/// assert_eq!(store.state()?, 1);
/// # Ok::<(), pawl::StoreError>(())
/// ```
pub fn create_store<S, A, R>(
    reducer: R,
    preloaded: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + Send + Sync + 'static,
    A: fmt::Debug + 'static,
    R: Fn(Option<S>, StoreAction<&A>) -> S + Send + Sync + 'static,
{
    let create: StoreCreator<S, A> =
        Box::new(|reducer, preloaded| Ok(Store::construct(reducer, preloaded)));
    let create = match enhancer {
        Some(enhance) => enhance(create),
        None => create,
    };
    create(Arc::new(reducer), preloaded)
}
