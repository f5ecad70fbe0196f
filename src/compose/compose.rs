/// A boxed unary transformer, consumed when called.
pub type Composed<T> = Box<dyn FnOnce(T) -> T>;

/// Compose a list of unary functions from right to left.
///
/// The rightmost function is applied first and each result feeds the
/// function to its left, so `compose(vec![f, g, h])` behaves as
/// `|x| f(g(h(x)))`.
///
/// An empty list composes to the identity function; a single function is
/// returned unchanged, without a wrapping call frame.
///
/// # Example
///
/// ```
/// use pawl::compose;
///
/// let add_one: Box<dyn FnOnce(i32) -> i32> = Box::new(|x| x + 1);
/// let double: Box<dyn FnOnce(i32) -> i32> = Box::new(|x| x * 2);
///
/// // double runs first, add_one second
/// assert_eq!(compose(vec![add_one, double])(10), 21);
/// ```
pub fn compose<T: 'static>(funcs: Vec<Composed<T>>) -> Composed<T> {
    funcs
        .into_iter()
        .reduce(|outer, inner| Box::new(move |x| outer(inner(x))))
        .unwrap_or_else(|| Box::new(|x| x))
}
