//! # courier
//!
//! A minimal HTTP framework that speaks HTTP straight off a TCP socket.
//! One read, one response, close. Nothing more.
//!
//! ## What it does
//!
//! - Parses the request line, headers, query string and body (JSON bodies are
//!   decoded, anything else is kept as text)
//! - Routes on exact paths first, then `:name` patterns
//! - Runs middleware batches and route handlers as one ordered chain
//! - Composes routers: mount a [`Router`] under a path prefix
//!
//! ## What it does not
//!
//! Keep-alive, chunked bodies, TLS, HTTP/2, pipelining, requests larger than
//! one read buffer. Put a proxy in front if you need those.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use courier::{handlers, Next, Request, Response, Router, Server};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier::Error> {
//!     let users = Router::new()
//!         .get("/", list_users)
//!         .get("/:id", handlers![no_cache, get_user]);
//!
//!     Server::new()
//!         .use_middleware(courier::middleware::trace)
//!         .post("/echo", echo)
//!         .mount("/users", users)
//!         .listen("127.0.0.1:7000", || println!("Awaiting connections..."))
//!         .await
//! }
//!
//! fn no_cache(_: &mut Request, res: &mut Response, next: &mut Next) {
//!     res.set_header("Cache-Control", "no-store");
//!     next.next();
//! }
//!
//! fn list_users(_: &mut Request, res: &mut Response, _: &mut Next) {
//!     res.send("alice, bob");
//! }
//!
//! fn get_user(req: &mut Request, res: &mut Response, _: &mut Next) {
//!     res.json(json!({ "id": req.param("id") }));
//! }
//!
//! fn echo(req: &mut Request, res: &mut Response, _: &mut Next) {
//!     res.send(req.body().to_string());
//! }
//! ```

mod body;
mod chain;
mod codec;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod table;

pub mod matcher;
pub mod middleware;

pub use body::Body;
pub use chain::Next;
pub use codec::{decode, encode};
pub use error::Error;
pub use handler::{Handler, Handlers};
pub use method::Method;
pub use request::Request;
pub use response::{Response, SERVER_NAME};
pub use router::Router;
pub use server::{DEFAULT_READ_BUFFER, NOT_HTTP_REPLY, Server};
pub use status::Status;
