//! Callback handles carried in attribute bags.
//!
//! A [`Handler`] is a shared closure compared by pointer identity: two clones of
//! the same handler are equal, two separately created closures never are, even
//! if their code is identical. Callers that want a subscription to survive a
//! re-render keep a clone of the handler and pass it again.

use std::fmt;
use std::rc::Rc;

/// A value callback (`Fn(&str)`) with identity semantics.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&str)>);

impl Handler {
    /// Wrap a closure into a new handler with a fresh identity.
    pub fn new(f: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, value: &str) {
        (self.0)(value);
    }

    /// Whether `self` and `other` are the same callback.
    pub fn same(&self, other: &Handler) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Handler {}

impl<F> From<F> for Handler
where
    F: Fn(&str) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}
