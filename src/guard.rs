//! Guarded-call primitive: run caller code with panic isolation.
//!
//! The normalizer never lets a panic escape a decorated invocation or a
//! chained continuation. Every call into user code goes through [`try_call`],
//! which converts a panic into a [`Fault::Panicked`] the completion callback
//! can receive like any other error.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::chain::Completion;
use crate::error::{Fault, PanicPayload};

/// Runs `f` with panic isolation.
///
/// A panic raised by `f` is caught and returned as [`Fault::Panicked`];
/// the panic payload's message is preserved.
pub fn try_call<T>(f: impl FnOnce() -> T) -> Result<T, Fault> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => {
            let payload = PanicPayload::from_raw(&payload);
            tracing::debug!(panic_message = payload.message(), "caught panic in guarded call");
            Err(Fault::from(payload))
        }
    }
}

/// Returns a closure that invokes `func` through [`try_call`] and forwards
/// any caught fault to `errback`'s error channel.
///
/// The success return value of `func` is discarded; in this model results
/// travel through callbacks, not return values.
pub fn catch_to<T: 'static>(
    errback: &Completion<T>,
    func: impl Fn(T) + 'static,
) -> impl Fn(T) + 'static {
    let errback = errback.clone();
    move |value| {
        if let Err(fault) = try_call(|| func(value)) {
            errback.complete(Err(fault));
        }
    }
}
