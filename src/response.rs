//! Outgoing HTTP response type.
//!
//! A [`Response`] is created by the server for every request, seeded with the
//! default headers, and handed to each handler in the chain. Handlers set the
//! status and headers they want, then emit it with [`Response::send`] or
//! [`Response::json`].

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

use crate::body::Body;
use crate::codec;

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "courier";

pub(crate) const DEFAULT_VERSION: &str = "HTTP/1.1";

/// An outgoing HTTP response.
///
/// Every call to [`send`](Response::send) or [`json`](Response::json)
/// serialises the response as it stands and queues that frame for the
/// connection. Nothing dedupes the calls: emitting twice puts two complete
/// responses on the wire.
///
/// ```rust
/// use courier::{Response, Status};
///
/// let mut res = Response::default();
/// res.set_status(Status::Created);
/// res.set_header("Location", "/users/42");
/// res.send("created");
/// assert_eq!(res.frames().len(), 1);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) version: String,
    pub(crate) status: u16,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Body,
    frames: Vec<Bytes>,
}

impl Response {
    /// A `200` response for a request that spoke `version`, with the
    /// default `Content-Type` and `Server` headers.
    pub fn new(version: impl Into<String>) -> Self {
        let headers = HashMap::from([
            ("Content-Type".to_owned(), "text/plain".to_owned()),
            ("Server".to_owned(), SERVER_NAME.to_owned()),
        ]);
        Self {
            version: version.into(),
            status: 200,
            headers,
            body: Body::Empty,
            frames: Vec::new(),
        }
    }

    pub fn version(&self) -> &str { &self.version }
    pub fn status(&self) -> u16 { self.status }
    pub fn headers(&self) -> &HashMap<String, String> { &self.headers }
    pub fn body(&self) -> &Body { &self.body }

    /// Frames emitted so far, in emission order.
    pub fn frames(&self) -> &[Bytes] { &self.frames }

    pub fn set_status(&mut self, code: impl Into<u16>) -> &mut Self {
        self.status = code.into();
        self
    }

    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Emits a plain-text response.
    pub fn send(&mut self, body: impl Into<String>) {
        self.body = Body::from(body.into());
        self.emit();
    }

    /// Emits `value` as a JSON-escaped string body.
    ///
    /// `Content-Type` is left as it is; set it first if the client needs
    /// `application/json`.
    pub fn json(&mut self, value: Value) {
        self.body = Body::from(value);
        self.emit();
    }

    fn emit(&mut self) {
        let frame = codec::encode(self);
        self.frames.push(frame);
    }

    pub(crate) fn take_frames(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.frames)
    }
}

impl Default for Response {
    fn default() -> Self { Self::new(DEFAULT_VERSION) }
}
