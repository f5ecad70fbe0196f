use std::fmt;

use crate::error::StoreError;
use crate::store::Store;

/// Wrap an action creator so every call dispatches the action it produces.
///
/// Useful for handing state-changing entry points to code that should not
/// know about the store: the callee invokes a plain function, the action it
/// builds is dispatched in the same call. The bound function returns the
/// dispatched action, exactly as [`Store::dispatch`] does.
///
/// # Example
///
/// ```
/// use pawl::{bind_action_creator, Store, StoreAction};
///
/// #[derive(Debug)]
/// struct AddToCart {
///     item: String,
/// }
///
/// let store = Store::new(|state: Option<Vec<String>>, action: StoreAction<&AddToCart>| {
///     let mut state = state.unwrap_or_default();
///     if let StoreAction::Action(AddToCart { item }) = action {
///         state.push(item.clone());
///     }
///     state
/// });
///
/// let add_to_cart = bind_action_creator(
///     |item: &str| AddToCart { item: item.to_string() },
///     &store,
/// );
///
/// add_to_cart("apples")?;
/// add_to_cart("pears")?;
/// assert_eq!(store.state()?.len(), 2);
/// # Ok::<(), pawl::StoreError>(())
/// ```
pub fn bind_action_creator<S, A, P, C>(
    creator: C,
    store: &Store<S, A>,
) -> impl Fn(P) -> Result<A, StoreError>
where
    S: Clone + Send + Sync + 'static,
    A: fmt::Debug + 'static,
    C: Fn(P) -> A,
{
    let store = store.clone();
    move |payload| store.dispatch(creator(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreAction;

    #[derive(Debug, PartialEq, Eq)]
    struct Push(u32);

    fn stack(state: Option<Vec<u32>>, action: StoreAction<&Push>) -> Vec<u32> {
        let mut state = state.unwrap_or_default();
        if let StoreAction::Action(Push(value)) = action {
            state.push(*value);
        }
        state
    }

    #[test]
    fn bound_creator_dispatches() {
        let store = Store::new(stack);
        let push = bind_action_creator(Push, &store);

        assert_eq!(push(3).unwrap(), Push(3));
        push(5).unwrap();

        assert_eq!(store.state().unwrap(), vec![3, 5]);
    }

    #[test]
    fn bound_creator_goes_through_enhanced_dispatch() {
        use crate::middleware::{apply_middleware, Dispatch, Middleware};
        use crate::store::create_store;
        use std::sync::Arc;

        let capper: Middleware<Vec<u32>, Push> = Box::new(|_api| {
            Box::new(|next: Dispatch<Push>| {
                Arc::new(move |Push(value)| next(Push(value.min(10))))
            })
        });

        let store = create_store(stack, None, Some(apply_middleware(vec![capper]))).unwrap();
        let push = bind_action_creator(Push, &store);

        push(100).unwrap();
        assert_eq!(store.state().unwrap(), vec![10]);
    }
}
