//! Completion callbacks and guarded chaining.
//!
//! This module provides the two callback wrappers the normalizer is built
//! from, plus the chaining combinators:
//!
//! - [`err_to`]: error-first short-circuit — forward an error to the sink,
//!   or hand the success value to a handler
//! - [`err_to_with_catch`]: [`err_to`] with panic isolation around the
//!   handler; the public guarded-chaining combinator
//!
//! # At-most-once guarantee
//!
//! For a single call to a produced [`Continuation`], the error sink is
//! invoked at most once: either via the short-circuit path (the call carried
//! an error) or via the catch path (the handler panicked), never both. The
//! two paths are structurally exclusive — the handler only runs when there
//! was no error to short-circuit.

use core::fmt;
use std::rc::Rc;

use crate::error::Fault;
use crate::guard::catch_to;

/// The terminal completion callback of a decorated invocation.
///
/// Receives either `Ok(result)` or `Err(fault)` — never both populated,
/// never neither. Cheap to clone; clones share the underlying closure.
///
/// Single-threaded cooperative model: no `Send`/`Sync` bounds.
pub struct Completion<T> {
    inner: Rc<dyn Fn(Result<T, Fault>)>,
}

impl<T> Completion<T> {
    /// Wraps a closure as a completion callback.
    pub fn new(f: impl Fn(Result<T, Fault>) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    /// Delivers the terminal outcome of an invocation.
    pub fn complete(&self, outcome: Result<T, Fault>) {
        (self.inner)(outcome);
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// A continuation produced by [`err_to`] or [`err_to_with_catch`].
///
/// Stands in for the callback a nested operation will eventually invoke
/// with `(error, result)`. Remains valid until invoked or discarded; there
/// is no cancellation.
pub struct Continuation<T> {
    inner: Rc<dyn Fn(Result<T, Fault>)>,
}

impl<T> Continuation<T> {
    fn new(f: impl Fn(Result<T, Fault>) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    /// Resumes the continuation with the nested operation's outcome.
    pub fn resume(&self, outcome: Result<T, Fault>) {
        (self.inner)(outcome);
    }
}

impl<T> Clone for Continuation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Continuation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Error-first short-circuit combinator.
///
/// The produced continuation forwards an error outcome directly to
/// `errback` without touching `success`; a success outcome is handed to
/// `success` with the error channel stripped.
///
/// This is the bare chaining step. Callers almost always want
/// [`err_to_with_catch`], which additionally guards `success` against
/// panics.
pub fn err_to<T: 'static>(
    errback: &Completion<T>,
    success: impl Fn(T) + 'static,
) -> Continuation<T> {
    let errback = errback.clone();
    Continuation::new(move |outcome| match outcome {
        Err(fault) => {
            tracing::trace!(%fault, "short-circuiting error to sink");
            errback.complete(Err(fault));
        }
        Ok(value) => success(value),
    })
}

/// Guarded chaining: [`err_to`] with panic isolation around `success`.
///
/// Errors arriving at the continuation short-circuit to `errback`; a panic
/// raised by `success` is caught and delivered to `errback` as a fault.
/// Either way `errback` fires at most once per resumption.
pub fn err_to_with_catch<T: 'static>(
    errback: &Completion<T>,
    success: impl Fn(T) + 'static,
) -> Continuation<T> {
    err_to(errback, catch_to(errback, success))
}
