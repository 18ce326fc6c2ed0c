//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::body::Body;

/// An incoming HTTP request, decoded from the single read of a connection.
///
/// Handlers receive it mutably so middlewares can annotate it (add a header,
/// rewrite the body) for the handlers after them.
#[derive(Clone, Debug, Default)]
pub struct Request {
    pub(crate) version: String,
    pub(crate) method: String,
    pub(crate) route: String,
    pub(crate) params: HashMap<String, String>,
    pub(crate) query: HashMap<String, String>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Body,
}

impl Request {
    pub fn version(&self) -> &str { &self.version }
    pub fn method(&self) -> &str { &self.method }

    /// Request path with the query string removed and trailing `/` trimmed.
    pub fn route(&self) -> &str { &self.route }

    pub fn params(&self) -> &HashMap<String, String> { &self.params }
    pub fn queries(&self) -> &HashMap<String, String> { &self.query }
    pub fn headers(&self) -> &HashMap<String, String> { &self.headers }
    pub fn body(&self) -> &Body { &self.body }

    pub fn body_mut(&mut self) -> &mut Body { &mut self.body }
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> { &mut self.headers }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    /// Parameters are only bound when the request matched a pattern route.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a query-string value. `?flag` yields `Some("")`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Header lookup by exact name, as sent by the client.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
