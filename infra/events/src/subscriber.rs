use std::fmt;
use std::sync::Arc;

/// Error type a subscriber may return; anything boxed as a standard error.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a single subscriber invocation.
pub type HandlerResult = Result<(), HandlerError>;

type Callback<P> = dyn Fn(&P) -> HandlerResult + Send + Sync;

/// A registered callback, identified by reference identity.
///
/// Clones share identity: subscribing a clone is the same as subscribing the
/// original, and either can be used to unsubscribe. Two subscribers built from
/// identical closures are still distinct.
pub struct Subscriber<P> {
    callback: Arc<Callback<P>>,
}

impl<P> Subscriber<P> {
    /// Wraps a fallible callback. An `Err` is reported to the bus diagnostic
    /// sink and does not interrupt delivery to other subscribers.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        Self { callback: Arc::new(callback) }
    }

    /// Wraps a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        Self::new(move |payload| {
            callback(payload);
            Ok(())
        })
    }

    /// `true` when both handles refer to the same registered callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    pub(crate) fn call(&self, payload: &P) -> HandlerResult {
        (self.callback)(payload)
    }
}

impl<P> Clone for Subscriber<P> {
    fn clone(&self) -> Self {
        Self { callback: Arc::clone(&self.callback) }
    }
}

impl<P> PartialEq for Subscriber<P> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<P> Eq for Subscriber<P> {}

impl<P> fmt::Debug for Subscriber<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscriber").field(&Arc::as_ptr(&self.callback).cast::<()>()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let a = Subscriber::<u8>::infallible(|_| {});
        let b = a.clone();
        assert!(a.same_as(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn identical_closures_are_distinct() {
        let a = Subscriber::<u8>::infallible(|_| {});
        let b = Subscriber::<u8>::infallible(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn errors_are_returned_from_call() {
        let failing = Subscriber::<u8>::new(|n| Err(format!("bad {n}").into()));
        let err = failing.call(&3).unwrap_err();
        assert_eq!(err.to_string(), "bad 3");
    }
}
