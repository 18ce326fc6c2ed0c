//! TCP listener and per-connection request handling.
//!
//! # Connection lifecycle
//!
//! Every accepted connection gets its own task. The task:
//! 1. Reads **once**, up to the configured buffer size (1024 bytes by default).
//!    There is no reassembly, so a larger request is truncated.
//! 2. Answers non-HTTP payloads with a fixed line of text.
//! 3. Decodes, routes and runs the handler chain for HTTP payloads.
//! 4. Writes every frame the chain emitted, then closes the connection.
//!
//! No keep-alive, no pipelining, no graceful drain. The accept loop never
//! waits on a connection task, and only a failure of the listening socket
//! itself stops the server.
//!
//! Routes and middlewares must all be registered before serving starts:
//! [`Server::listen`] consumes the server and shares its routes read-only
//! with every connection task.

use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{debug, error, info, warn};

use crate::chain;
use crate::codec;
use crate::error::Error;
use crate::handler::Handlers;
use crate::method::Method;
use crate::request::Request;
use crate::response::{DEFAULT_VERSION, Response};
use crate::router::Router;
use crate::status::Status;

/// Size of the single read performed on each connection.
pub const DEFAULT_READ_BUFFER: usize = 1024;

/// Reply to clients that do not speak HTTP.
pub const NOT_HTTP_REPLY: &str = "Thanks for connecting, but I only understand HTTP";

/// Per-connection settings copied into every connection task.
#[derive(Clone, Copy, Debug)]
struct ConnConfig {
    read_buffer: usize,
    read_timeout: Option<Duration>,
}

/// The HTTP server: one root [`Router`] plus connection settings.
///
/// ```rust,no_run
/// use courier::{Next, Request, Response, Server};
///
/// fn hello(req: &mut Request, res: &mut Response, _: &mut Next) {
///     res.send(format!("hello from {}", req.route()));
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), courier::Error> {
///     Server::new()
///         .get("/", hello)
///         .listen("127.0.0.1:7000", || println!("Awaiting connections..."))
///         .await
/// }
/// ```
pub struct Server {
    router: Router,
    config: ConnConfig,
}

impl Server {
    pub fn new() -> Self {
        Self::with_router(Router::new())
    }

    /// Uses `router` as the root router: its routes and middlewares become
    /// the server's own.
    pub fn with_router(router: Router) -> Self {
        Self {
            router,
            config: ConnConfig { read_buffer: DEFAULT_READ_BUFFER, read_timeout: None },
        }
    }

    /// Sets how many bytes the single read of a connection may return.
    pub fn read_buffer(mut self, bytes: usize) -> Self {
        self.config.read_buffer = bytes.max(1);
        self
    }

    /// Drops connections whose request has not arrived within `timeout`.
    ///
    /// Unset by default: a silent client holds its task forever, without
    /// affecting any other connection.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    // ── Registration ──────────────────────────────────────────────────────────

    pub fn on(mut self, method: Method, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.router = self.router.on(method, path, handlers);
        self
    }

    pub fn get(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Get, path, handlers)
    }

    pub fn post(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Post, path, handlers)
    }

    pub fn put(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Put, path, handlers)
    }

    pub fn patch(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Patch, path, handlers)
    }

    pub fn delete(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Delete, path, handlers)
    }

    /// Appends a global middleware batch; see [`Router::use_middleware`].
    pub fn use_middleware(mut self, handlers: impl Into<Handlers>) -> Self {
        self.router = self.router.use_middleware(handlers);
        self
    }

    /// Mounts `router` under `prefix`.
    ///
    /// This is a one-time copy: `router`'s routes are rewritten under the
    /// prefix, their middleware cutoffs shifted past the server's current
    /// batches, and `router`'s batches appended to the server's.
    pub fn mount(mut self, prefix: &str, router: Router) -> Self {
        self.router.mount(prefix, router);
        self
    }

    // ── Serving ───────────────────────────────────────────────────────────────

    /// Binds `addr` and serves forever.
    ///
    /// `on_ready` runs on its own task once the socket is bound; it may run
    /// before or after the first connection is accepted.
    ///
    /// Returns only if binding or accepting fails.
    pub async fn listen(
        self,
        addr: impl ToSocketAddrs,
        on_ready: impl FnOnce() + Send + 'static,
    ) -> Result<(), Error> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, on_ready).await
    }

    /// Serves on an already-bound listener. See [`Server::listen`].
    pub async fn serve(
        self,
        listener: TcpListener,
        on_ready: impl FnOnce() + Send + 'static,
    ) -> Result<(), Error> {
        let addr = listener.local_addr()?;
        info!(%addr, routes = self.router.routes.len(), "courier listening");

        tokio::spawn(async move { on_ready() });

        // Wrap router in Arc so it can be shared across concurrent connection
        // tasks without copying the route table.
        let router = Arc::new(self.router);
        let config = self.config;

        loop {
            let (stream, peer) = listener.accept().await.inspect_err(|e| {
                error!("accept error: {e}");
            })?;

            let router = Arc::clone(&router);
            tokio::spawn(async move {
                debug!(%peer, "connection accepted");
                if let Err(e) = handle_connection(&router, stream, config).await {
                    error!(%peer, "connection error: {e}");
                }
            });
        }
    }
}

impl Default for Server {
    fn default() -> Self { Self::new() }
}

// ── Connection handling ──────────────────────────────────────────────────────

async fn handle_connection(
    router: &Router,
    mut stream: TcpStream,
    config: ConnConfig,
) -> Result<(), Error> {
    let mut buf = BytesMut::with_capacity(config.read_buffer);
    let read = stream.read_buf(&mut buf);
    let n = match config.read_timeout {
        Some(limit) => tokio::time::timeout(limit, read).await.map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::TimedOut, "request read timed out")
        })??,
        None => read.await?,
    };
    if n == 0 {
        debug!("peer closed before sending");
        return Ok(());
    }
    buf.truncate(config.read_buffer);

    let frames = if codec::is_http(&buf) {
        respond(router, &buf)
    } else {
        vec![Bytes::from_static(NOT_HTTP_REPLY.as_bytes())]
    };

    for frame in frames {
        stream.write_all(&frame).await?;
    }
    stream.shutdown().await?;
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Core path: decodes one request, runs its chain, returns the frames to
/// write in order. Every failure becomes a response here.
pub(crate) fn respond(router: &Router, raw: &[u8]) -> Vec<Bytes> {
    let mut req = match codec::decode(raw) {
        Ok(req) => req,
        Err(e) => {
            warn!("{e}");
            let mut res = Response::new(DEFAULT_VERSION);
            res.set_status(Status::BadRequest);
            res.send(e.to_string());
            return res.take_frames();
        }
    };
    let mut res = Response::new(req.version.clone());

    match router.lookup(&req.method, &req.route) {
        Ok(matched) => {
            req.params = matched.params;
            debug!(method = %req.method, path = %req.route, handlers = matched.chain.len(), "dispatching");
            if let Err(e) = chain::execute(&matched.chain, &mut req, &mut res) {
                error!(method = %req.method, path = %req.route, "{e}");
                res.set_status(Status::InternalServerError);
                res.send("Internal Server Error");
            }
        }
        Err(e) => {
            warn!("{e}");
            not_found(&req, &mut res);
        }
    }

    let frames = res.take_frames();
    if frames.is_empty() {
        debug!(method = %req.method, path = %req.route, "chain emitted no response");
    }
    frames
}

fn not_found(req: &Request, res: &mut Response) {
    res.set_status(Status::NotFound);
    res.send(format!("Path {} {} Not Found", req.method, req.route));
}
