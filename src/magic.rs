//! Magic callback: the injected replacement for a wrapped function's
//! terminal argument.
//!
//! In the dynamically-typed original convention, the injected callback
//! classifies its single argument at runtime: a function means "chain a
//! continuation", an error means "fail", anything else means "succeed".
//! Here that classification is an explicit tagged union, [`Outcome`], and
//! callers construct the variant themselves. The original three-way
//! precedence (callable > error > value) is preserved as the match order of
//! [`MagicCallback::dispatch`].
//!
//! The magic callback keeps no state between calls. A wrapped body may
//! invoke it several times — typically once to obtain a chained
//! continuation, which a nested operation resumes later — but nothing
//! guards against invoking multiple terminal paths; that discipline is the
//! wrapped body's responsibility.

use core::fmt;
use std::rc::Rc;

use crate::chain::{err_to_with_catch, Completion, Continuation};
use crate::error::Fault;

/// A success-path handler for a nested operation, registered through
/// [`MagicCallback::dispatch`] or [`MagicCallback::chain`].
pub struct Handler<T> {
    inner: Rc<dyn Fn(T)>,
}

impl<T> Handler<T> {
    /// Wraps a closure as a nested-operation handler.
    pub fn new(f: impl Fn(T) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    /// Invokes the handler with a nested operation's success value.
    pub fn handle(&self, value: T) {
        (self.inner)(value);
    }
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Classification of a magic-callback invocation.
///
/// Variant order mirrors the dispatch precedence: a continuation request
/// wins over an error, which wins over a plain value.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Chain a continuation for a nested operation.
    Continuation(Handler<T>),
    /// Fail: forward this fault down the completion's error channel.
    Err(Fault),
    /// Succeed: forward this value down the completion's success channel.
    Ok(T),
}

impl<T> Outcome<T> {
    /// Returns true if this is the `Continuation` variant.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation(_))
    }

    /// Returns true if this is the `Err` variant.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns true if this is the `Ok` variant.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl<T> From<Result<T, Fault>> for Outcome<T> {
    fn from(result: Result<T, Fault>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

/// The injected terminal argument of a wrapped function.
///
/// Constructed once per decorated invocation, bound to that invocation's
/// completion callback. Cheap to clone into nested closures.
pub struct MagicCallback<T> {
    completion: Completion<T>,
}

impl<T: 'static> MagicCallback<T> {
    /// Binds a magic callback to a completion callback.
    #[must_use]
    pub fn new(completion: Completion<T>) -> Self {
        Self { completion }
    }

    /// Classifies `arg` and routes it.
    ///
    /// - [`Outcome::Continuation`]: returns a guarded continuation chained
    ///   to the completion callback; errors from the nested operation and
    ///   panics from the handler both route back to the completion.
    /// - [`Outcome::Err`]: completes with the fault, verbatim.
    /// - [`Outcome::Ok`]: completes with the value.
    ///
    /// `Some` is returned only on the continuation arm.
    pub fn dispatch(&self, arg: Outcome<T>) -> Option<Continuation<T>> {
        match arg {
            Outcome::Continuation(handler) => {
                tracing::trace!("chaining guarded continuation");
                Some(self.chain(handler))
            }
            Outcome::Err(fault) => {
                tracing::trace!(%fault, "completing on error channel");
                self.completion.complete(Err(fault));
                None
            }
            Outcome::Ok(value) => {
                tracing::trace!("completing on success channel");
                self.completion.complete(Ok(value));
                None
            }
        }
    }

    /// Completes the invocation successfully with `value`.
    pub fn ok(&self, value: T) {
        self.completion.complete(Ok(value));
    }

    /// Completes the invocation with `fault` on the error channel.
    pub fn fail(&self, fault: Fault) {
        self.completion.complete(Err(fault));
    }

    /// Produces a guarded continuation for a nested operation.
    ///
    /// Equivalent to `dispatch(Outcome::Continuation(handler))` without the
    /// `Option` wrapper.
    #[must_use]
    pub fn chain(&self, handler: Handler<T>) -> Continuation<T> {
        err_to_with_catch(&self.completion, move |value| handler.handle(value))
    }
}

impl<T> Clone for MagicCallback<T> {
    fn clone(&self) -> Self {
        Self {
            completion: self.completion.clone(),
        }
    }
}

impl<T> fmt::Debug for MagicCallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagicCallback")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
