//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! A route keeps an ordered list of handlers of *different* closure types, and
//! the server keeps batches of middlewares next to them. Rust collections hold
//! one concrete type, so every handler is boxed behind a trait object:
//!
//! ```text
//! fn show(req: &mut Request, res: &mut Response, next: &mut Next) { … }
//!        ↓ router.get("/", show)
//! Handlers::from(show)                      ← From<F> for Handlers
//!        ↓
//! Arc::new(FnHandler(show))                 ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req, res, next)              ← one vtable dispatch
//! ```
//!
//! `Arc` rather than `Box` because mounting a router copies its handlers into
//! the server, and the server shares them with every connection task.

use std::sync::Arc;

use crate::chain::Next;
use crate::request::Request;
use crate::response::Response;

// ── Internal types ────────────────────────────────────────────────────────────

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: &mut Request, res: &mut Response, next: &mut Next);
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid handler or middleware.
///
/// You never implement this yourself. It is automatically satisfied for any
/// function or closure with the signature:
///
/// ```text
/// fn name(req: &mut Request, res: &mut Response, next: &mut Next)
/// ```
///
/// A middleware calls [`Next::next`] once to hand over to the following
/// handler. The last handler of a chain usually emits the response with
/// [`Response::send`] or [`Response::json`] instead.
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F> private::Sealed for F
where
    F: Fn(&mut Request, &mut Response, &mut Next) + Send + Sync + 'static,
{
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut Response, &mut Next) + Send + Sync + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Newtype wrapper that bridges a concrete handler `F` to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F> ErasedHandler for FnHandler<F>
where
    F: Fn(&mut Request, &mut Response, &mut Next),
{
    fn call(&self, req: &mut Request, res: &mut Response, next: &mut Next) {
        (self.0)(req, res, next)
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// An ordered list of handlers: one route's chain, or one middleware batch.
///
/// A single handler converts into a one-element list, so registration methods
/// accept either. Build longer lists with [`handlers!`](crate::handlers) or
/// [`Handlers::then`].
#[derive(Clone, Default)]
pub struct Handlers(pub(crate) Vec<BoxedHandler>);

impl Handlers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `handler` to the end of the list.
    pub fn then(mut self, handler: impl Handler) -> Self {
        self.0.push(handler.into_boxed_handler());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<F> From<F> for Handlers
where
    F: Fn(&mut Request, &mut Response, &mut Next) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new().then(handler)
    }
}

/// Builds a [`Handlers`] list, first to last.
///
/// ```rust
/// use courier::{handlers, Next, Request, Response, Router};
///
/// fn auth(_: &mut Request, _: &mut Response, next: &mut Next) { next.next() }
/// fn show(_: &mut Request, res: &mut Response, _: &mut Next) { res.send("ok") }
///
/// let router = Router::new().get("/me", handlers![auth, show]);
/// ```
#[macro_export]
macro_rules! handlers {
    ($($handler:expr),+ $(,)?) => {
        $crate::Handlers::new()$(.then($handler))+
    };
}
