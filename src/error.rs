//! Unified error type.

use thiserror::Error;

/// The error type returned by courier's fallible operations.
///
/// The first three variants never leave a connection: the server turns them
/// into `400`, `404` and `500` responses. Only [`Error::Transport`] raised by
/// the listening socket escapes [`Server::listen`](crate::Server::listen).
#[derive(Debug, Error)]
pub enum Error {
    /// The request line or header block could not be parsed.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No exact or pattern route exists for this method and path.
    #[error("route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// A handler ran while the continuation count did not match its position.
    #[error("broken chain at handler {position}: continuation called {calls} time(s)")]
    BrokenChain { position: usize, calls: usize },

    /// Socket bind, accept, read or write failure.
    #[error("io: {0}")]
    Transport(#[from] std::io::Error),
}
