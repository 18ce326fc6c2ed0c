//! Middleware and handler chain execution.
//!
//! The effective chain of a route is every middleware batch registered
//! before the route (its cutoff), flattened in registration order, followed by
//! the route's own handlers.
//!
//! Continuation is a counter, not a closure. Before handler `i` runs the
//! executor checks that [`Next::next`] has been called exactly `i` times so
//! far. A handler that does not call it stops the chain; if another handler
//! was due to run, the mismatch surfaces as [`Error::BrokenChain`]. When the
//! silent handler was the last one the chain simply completes.

use tracing::trace;

use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::Response;

/// Continuation handed to every handler.
#[derive(Debug, Default)]
pub struct Next {
    calls: usize,
}

impl Next {
    /// Signals that the next handler in the chain should run.
    pub fn next(&mut self) {
        self.calls += 1;
    }

    /// How many times the continuation has been called in this chain.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

/// Runs `chain` in order against one request/response pair.
pub(crate) fn execute(
    chain: &[BoxedHandler],
    req: &mut Request,
    res: &mut Response,
) -> Result<(), Error> {
    let mut next = Next::default();
    for (position, handler) in chain.iter().enumerate() {
        if next.calls != position {
            return Err(Error::BrokenChain { position, calls: next.calls });
        }
        trace!(position, "running handler");
        handler.call(req, res, &mut next);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::handler::Handler;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn step(log: &Log, name: &'static str, proceed: bool) -> BoxedHandler {
        let log = Arc::clone(log);
        let handler = move |_: &mut Request, _: &mut Response, next: &mut Next| {
            log.lock().unwrap().push(name);
            if proceed {
                next.next();
            }
        };
        handler.into_boxed_handler()
    }

    fn run(chain: &[BoxedHandler]) -> Result<(), Error> {
        execute(chain, &mut Request::default(), &mut Response::default())
    }

    #[test]
    fn runs_every_handler_in_order() {
        let log = Log::default();
        let chain = [step(&log, "a", true), step(&log, "b", true), step(&log, "c", false)];

        assert!(run(&chain).is_ok());
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn missing_continuation_breaks_the_chain() {
        let log = Log::default();
        let chain = [step(&log, "a", true), step(&log, "b", false), step(&log, "c", false)];

        let err = run(&chain).unwrap_err();
        assert!(matches!(err, Error::BrokenChain { position: 2, calls: 1 }));
        assert_eq!(*log.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn silent_last_handler_completes() {
        let log = Log::default();
        let chain = [step(&log, "a", true), step(&log, "b", false)];

        assert!(run(&chain).is_ok());
        assert_eq!(*log.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn calling_next_twice_also_breaks() {
        let twice = |_: &mut Request, _: &mut Response, next: &mut Next| {
            next.next();
            next.next();
        };
        let log = Log::default();
        let chain = [twice.into_boxed_handler(), step(&log, "b", false)];

        assert!(matches!(run(&chain), Err(Error::BrokenChain { position: 1, calls: 2 })));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_chain_is_ok() {
        assert!(run(&[]).is_ok());
    }
}
