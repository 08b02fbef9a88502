//! Deterministic event queue for tests and demos.
//!
//! The normalizer assumes a single-threaded, event-loop host runtime: a
//! wrapped function returns synchronously and nested operations resume
//! continuations later, from the event queue. [`EventQueue`] plays that
//! host's role deterministically — callbacks run in FIFO order when the
//! caller drains the queue, never before.
//!
//! # Example
//!
//! ```
//! use autocb::lab::EventQueue;
//!
//! let queue = EventQueue::new();
//! let q2 = queue.clone();
//! queue.defer(move || q2.defer(|| {}));
//! assert_eq!(queue.run_until_idle(), 2);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Deferred = Box<dyn FnOnce()>;

/// A FIFO queue of deferred callbacks.
///
/// Clones share the same queue. Reentrant defers are allowed: a callback
/// running from [`run_until_idle`](Self::run_until_idle) may defer more
/// work, which runs in the same drain.
#[derive(Clone, Default)]
pub struct EventQueue {
    deferred: Rc<RefCell<VecDeque<Deferred>>>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `callback` to run on the next drain.
    pub fn defer(&self, callback: impl FnOnce() + 'static) {
        self.deferred.borrow_mut().push_back(Box::new(callback));
    }

    /// Returns the number of callbacks currently scheduled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deferred.borrow().len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deferred.borrow().is_empty()
    }

    /// Runs scheduled callbacks in FIFO order until the queue is idle,
    /// including work deferred while draining. Returns the number of
    /// callbacks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            // Borrow is released before the callback runs so it may defer.
            let next = self.deferred.borrow_mut().pop_front();
            let Some(callback) = next else {
                return ran;
            };
            callback();
            ran += 1;
        }
    }
}

impl core::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.len())
            .finish()
    }
}
