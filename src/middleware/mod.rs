//! Built-in middleware.
//!
//! Middleware is an ordinary handler that calls [`Next::next`] when it is
//! done. Register it with `use_middleware`; it runs in front of every route
//! registered after it.
//!
//! ```rust
//! use courier::{middleware, Server};
//!
//! let server = Server::new().use_middleware(middleware::trace);
//! ```

use tracing::info;

use crate::{Next, Request, Response};

/// Logs the method, route and client-supplied `Host` of every request, then
/// hands over to the next handler.
pub fn trace(req: &mut Request, _res: &mut Response, next: &mut Next) {
    info!(
        method = %req.method(),
        path = %req.route(),
        host = req.header("Host").unwrap_or("-"),
        "request"
    );
    next.next();
}
