//! Autocb: Node-style callback normalization with typed dispatch.
//!
//! # Overview
//!
//! Autocb decorates a function so that its final argument is always treated
//! as an error-first completion callback, and failure — however it arises —
//! converges on that callback:
//!
//! - **Decoration** ([`decorate()`]): the wrapped function's trailing callback
//!   is replaced by an injected [`MagicCallback`]; a panic during the
//!   initial synchronous execution window is caught and delivered to the
//!   completion callback instead of propagating.
//! - **Magic dispatch** ([`MagicCallback::dispatch`]): one injected callback
//!   classifies its argument — chain a continuation, fail with an error, or
//!   succeed with a value — as an explicit tagged union, [`Outcome`].
//! - **Guarded chaining** ([`err_to_with_catch`]): an error-short-circuiting,
//!   panic-catching continuation combinator, exposed so callers can build
//!   equivalent continuations by hand.
//!
//! # Guarantees
//!
//! - **Single terminal channel**: a completion callback receives either an
//!   error or a result, never both populated, never neither
//! - **No silent drops**: no failure class is swallowed; usage errors fail
//!   fast before the wrapped function runs, everything else reaches the
//!   completion callback
//! - **Verbatim upstream errors**: error values passed by caller code are
//!   forwarded unwrapped and unaltered
//! - **Error tunneling**: a fault raised at any chained depth routes back to
//!   the original, outermost completion callback
//!
//! # Execution model
//!
//! Single-threaded, callback-driven and cooperative: decorated calls return
//! synchronously and nested operations resume continuations from the host's
//! event queue. Nothing here blocks, retries, or cancels. The deterministic
//! [`lab::EventQueue`] stands in for the host runtime in tests.
//!
//! # Module Structure
//!
//! - [`decorate`](mod@decorate): decoration entry point and dynamic call surface
//! - [`magic`]: injected magic callback and its [`Outcome`] dispatch
//! - [`chain`]: completion/continuation wrappers and chaining combinators
//! - [`guard`]: panic-isolating guarded-call primitive
//! - [`error`]: usage errors, faults, panic payloads
//! - [`lab`]: deterministic event queue for tests
//!
//! # Example
//!
//! ```
//! use autocb::{decorate, CallArg, Completion};
//!
//! // f(arg, autocb) => autocb(arg)
//! let echo = decorate::<i32, _>(|args, magic| {
//!     let v = args.into_iter().next().and_then(CallArg::into_value).unwrap();
//!     magic.ok(v);
//! });
//!
//! let done = Completion::new(|outcome| assert_eq!(outcome.unwrap(), 42));
//! echo.invoke(vec![CallArg::Value(42), CallArg::Callback(done)]).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::borrowed_box)]

pub mod chain;
pub mod decorate;
pub mod error;
pub mod guard;
pub mod lab;
pub mod magic;

pub use chain::{err_to, err_to_with_catch, Completion, Continuation};
pub use decorate::{decorate, CallArg, Decorated};
pub use error::{Fault, PanicPayload, UsageError};
pub use guard::{catch_to, try_call};
pub use magic::{Handler, MagicCallback, Outcome};
