//! Decoration entry point: wrap a function so its final argument is always
//! a completion callback and synchronous panics route to it.
//!
//! A decorated invocation:
//!
//! 1. requires at least one argument, the trailing completion callback —
//!    otherwise fails synchronously with [`UsageError`], before the wrapped
//!    function runs;
//! 2. pops that callback and binds a [`MagicCallback`] to it;
//! 3. runs the wrapped function with the remaining arguments plus the magic
//!    callback, under panic isolation: a panic in the initial synchronous
//!    execution window is delivered to the completion callback as a
//!    [`Fault`](crate::error::Fault), and the decorated call itself returns
//!    normally.
//!
//! Each invocation is independent; no state is shared across calls.

use core::fmt;
use std::rc::Rc;

use crate::chain::Completion;
use crate::error::UsageError;
use crate::guard::try_call;
use crate::magic::MagicCallback;

/// One positional argument of a decorated invocation.
///
/// This is the crate's dynamic boundary: the one place where "is the last
/// argument a callback?" is a runtime question, as it is in the host
/// convention being normalized. Everywhere else types are static.
pub enum CallArg<T> {
    /// A plain positional value, passed through to the wrapped function.
    Value(T),
    /// A completion callback.
    Callback(Completion<T>),
}

impl<T> CallArg<T> {
    /// Returns true if this argument is a callback.
    #[must_use]
    pub const fn is_callback(&self) -> bool {
        matches!(self, Self::Callback(_))
    }

    /// Extracts the plain value, if this argument is one.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Callback(_) => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CallArg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Callback(cb) => f.debug_tuple("Callback").field(cb).finish(),
        }
    }
}

/// A function wrapped by [`decorate`].
///
/// Invoke with [`Decorated::invoke`]. Cheap to clone.
pub struct Decorated<T> {
    wrapped: Rc<dyn Fn(Vec<CallArg<T>>, MagicCallback<T>)>,
}

impl<T: 'static> Decorated<T> {
    /// Invokes the decorated function.
    ///
    /// The last element of `args` must be a [`CallArg::Callback`]; the
    /// remaining elements are forwarded to the wrapped function together
    /// with the injected [`MagicCallback`].
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] synchronously, without running the wrapped
    /// function, when `args` is empty or its last element is not a callback.
    pub fn invoke(&self, mut args: Vec<CallArg<T>>) -> Result<(), UsageError> {
        let Some(last) = args.pop() else {
            return Err(UsageError::MissingCallback);
        };
        let CallArg::Callback(completion) = last else {
            return Err(UsageError::LastArgumentNotCallback);
        };

        tracing::debug!(arity = args.len(), "invoking decorated function");
        let magic = MagicCallback::new(completion.clone());
        if let Err(fault) = try_call(|| (self.wrapped)(args, magic)) {
            completion.complete(Err(fault));
        }
        Ok(())
    }
}

impl<T> Clone for Decorated<T> {
    fn clone(&self) -> Self {
        Self {
            wrapped: Rc::clone(&self.wrapped),
        }
    }
}

impl<T> fmt::Debug for Decorated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorated")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Wraps `wrapped` as a [`Decorated`] function.
///
/// `wrapped` receives the invocation's positional arguments (trailing
/// callback already stripped) and the injected [`MagicCallback`] in its
/// place.
pub fn decorate<T, F>(wrapped: F) -> Decorated<T>
where
    T: 'static,
    F: Fn(Vec<CallArg<T>>, MagicCallback<T>) + 'static,
{
    Decorated {
        wrapped: Rc::new(wrapped),
    }
}
