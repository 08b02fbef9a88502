//! Property tests for the magic-callback dispatch laws.
//!
//! # Laws Tested
//!
//! ## Channel exclusivity
//! - Every terminal dispatch delivers exactly one outcome to the completion
//!   callback, on exactly one channel
//!
//! ## Verbatim forwarding
//! - Upstream error messages arrive at the completion callback unaltered
//!
//! ## Chaining
//! - A chained continuation resumed with a success value hands exactly that
//!   value to the handler
//! - A chained continuation resumed with an error never runs the handler
//! - The error sink fires at most once per resumption

use std::cell::RefCell;
use std::rc::Rc;

use autocb::{Completion, Fault, Handler, MagicCallback, Outcome};
use proptest::prelude::*;

fn counting_completion<T: 'static>() -> (Completion<T>, Rc<RefCell<Vec<Result<T, Fault>>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let completion = Completion::new({
        let log = log.clone();
        move |outcome| log.borrow_mut().push(outcome)
    });
    (completion, log)
}

proptest! {
    // ========================================================================
    // Channel Exclusivity Laws
    // ========================================================================

    #[test]
    fn value_dispatch_completes_once_on_success_channel(v in any::<i64>()) {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);

        let produced = magic.dispatch(Outcome::Ok(v));

        prop_assert!(produced.is_none());
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(*log[0].as_ref().unwrap(), v);
    }

    #[test]
    fn error_dispatch_completes_once_on_error_channel(msg in "[a-z]{1,16}") {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);

        let produced = magic.dispatch(Outcome::Err(Fault::msg(msg.clone())));

        prop_assert!(produced.is_none());
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(log[0].as_ref().unwrap_err().message(), msg);
    }

    #[test]
    fn continuation_dispatch_completes_nothing_until_resumed(v in any::<i64>()) {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);

        let continuation = magic
            .dispatch(Outcome::Continuation(Handler::new({
                let magic = magic.clone();
                move |value: i64| magic.ok(value)
            })))
            .expect("continuation arm produces a continuation");

        prop_assert!(log.borrow().is_empty());

        continuation.resume(Ok(v));
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(*log[0].as_ref().unwrap(), v);
    }

    // ========================================================================
    // Chaining Laws
    // ========================================================================

    #[test]
    fn chained_handler_receives_the_resumed_value(v in any::<i64>()) {
        let (completion, _log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);
        let seen = Rc::new(RefCell::new(None));

        let continuation = magic.chain(Handler::new({
            let seen = seen.clone();
            move |value| *seen.borrow_mut() = Some(value)
        }));
        continuation.resume(Ok(v));

        prop_assert_eq!(*seen.borrow(), Some(v));
    }

    #[test]
    fn chained_error_skips_handler_and_forwards_verbatim(msg in "[a-z]{1,16}") {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);
        let handler_ran = Rc::new(RefCell::new(false));

        let continuation = magic.chain(Handler::new({
            let handler_ran = handler_ran.clone();
            move |_| *handler_ran.borrow_mut() = true
        }));
        continuation.resume(Err(Fault::msg(msg.clone())));

        prop_assert!(!*handler_ran.borrow());
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(log[0].as_ref().unwrap_err().message(), msg);
    }

    #[test]
    fn errback_fires_at_most_once_per_resumption(
        outcomes in prop::collection::vec(
            prop_oneof![
                any::<i64>().prop_map(Ok::<i64, Fault>),
                "[a-z]{1,8}".prop_map(|m| Err(Fault::msg(m))),
            ],
            0..8,
        )
    ) {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);
        let continuation = magic.chain(Handler::new(|_| {}));

        let expected_errors = outcomes.iter().filter(|o| o.is_err()).count();
        for outcome in outcomes {
            continuation.resume(outcome);
        }

        // The sink fires exactly for the error resumptions: success values
        // went to the (non-completing) handler, and no resumption can hit
        // both the short-circuit and the catch path.
        prop_assert_eq!(log.borrow().len(), expected_errors);
    }

    #[test]
    fn handler_panic_and_short_circuit_are_exclusive(v in any::<i64>(), msg in "[a-z]{1,8}") {
        let (completion, log) = counting_completion::<i64>();
        let magic = MagicCallback::new(completion);
        let continuation = magic.chain(Handler::new(|_| panic!("handler fault")));

        continuation.resume(Ok(v));
        prop_assert_eq!(log.borrow().len(), 1);
        prop_assert!(log.borrow()[0].as_ref().unwrap_err().is_panic());

        continuation.resume(Err(Fault::msg(msg)));
        prop_assert_eq!(log.borrow().len(), 2);
        prop_assert!(!log.borrow()[1].as_ref().unwrap_err().is_panic());
    }
}
