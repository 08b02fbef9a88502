//! Error types for the callback normalizer.
//!
//! Error handling follows these principles:
//!
//! - Errors are explicit and typed (no stringly-typed errors)
//! - Caller misuse of the decoration contract fails fast, synchronously,
//!   and is never routed through a completion callback
//! - Panics raised inside guarded calls are isolated and converted to
//!   [`Fault::Panicked`]
//! - Upstream error values are forwarded verbatim, never wrapped or altered

use core::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Caller misuse of the decoration contract.
///
/// Raised synchronously by [`Decorated::invoke`](crate::decorate::Decorated::invoke)
/// before the wrapped function runs. Since no valid completion callback was
/// identified, these are returned to the caller directly instead of travelling
/// down the error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    /// The decorated call received no arguments at all.
    #[error("at least one argument, a completion callback, is required")]
    MissingCallback,

    /// The last argument of the decorated call was not a callback.
    #[error("last argument must be a callback")]
    LastArgumentNotCallback,
}

/// Payload from a caught panic.
///
/// Wraps the panic value for transport down the error channel of a
/// completion callback.
#[derive(Debug, Clone)]
pub struct PanicPayload {
    message: String,
}

impl PanicPayload {
    /// Creates a new panic payload with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts a human-readable message from a raw panic payload.
    ///
    /// `panic!` with a string literal produces `&str`; formatted panics
    /// produce `String`. Anything else is opaque.
    #[must_use]
    pub fn from_raw(payload: &Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { message }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: {}", self.message)
    }
}

/// A value travelling down the error channel of a completion callback.
///
/// Every failure class of the normalizer converges on this type:
///
/// - [`Fault::Upstream`]: an error explicitly passed by an operation into a
///   continuation or magic callback. Forwarded verbatim.
/// - [`Fault::Panicked`]: a panic caught during a guarded call — either the
///   wrapped function's initial synchronous execution window, or a chained
///   success handler.
#[derive(Debug, Clone)]
pub enum Fault {
    /// An error value handed to the normalizer by caller code.
    Upstream(Rc<dyn std::error::Error>),
    /// A panic caught inside a guarded call.
    Panicked(PanicPayload),
}

impl Fault {
    /// Wraps an upstream error value.
    #[must_use]
    pub fn upstream(err: impl std::error::Error + 'static) -> Self {
        Self::Upstream(Rc::new(err))
    }

    /// Builds an upstream fault from a bare message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Upstream(Rc::new(MessageError(message.into())))
    }

    /// Returns true if this fault came from a caught panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Returns the human-readable message of this fault.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Upstream(err) => err.to_string(),
            Self::Panicked(payload) => payload.message().to_string(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(err) => write!(f, "{err}"),
            Self::Panicked(payload) => write!(f, "{payload}"),
        }
    }
}

impl std::error::Error for Fault {}

impl From<PanicPayload> for Fault {
    fn from(payload: PanicPayload) -> Self {
        Self::Panicked(payload)
    }
}

/// Minimal error type backing [`Fault::msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MessageError {}
