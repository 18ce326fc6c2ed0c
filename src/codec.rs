//! Raw bytes to [`Request`], [`Response`] to raw bytes.
//!
//! The decoder is deliberately lenient. Only the request line is mandatory;
//! the header block ends at the first blank line *or* the first line that is
//! not a single `key: value` pair, and whatever follows that line is body.

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::body::Body;
use crate::error::Error;
use crate::matcher;
use crate::request::Request;
use crate::response::Response;
use crate::status;

const CRLF: &str = "\r\n";

/// Whether the payload's first line names an HTTP version.
pub(crate) fn is_http(raw: &[u8]) -> bool {
    let first = raw.split(|&b| b == b'\r').next().unwrap_or_default();
    first.windows(4).any(|w| w == b"HTTP")
}

/// Decodes one request from the bytes of a single read.
pub fn decode(raw: &[u8]) -> Result<Request, Error> {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.split(CRLF);

    let request_line = lines.next().unwrap_or_default();
    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    let [method, target, version] = tokens[..] else {
        return Err(Error::MalformedRequest(format!(
            "request line has {} token(s), expected 3: {request_line:?}",
            tokens.len()
        )));
    };

    let mut headers = HashMap::new();
    for line in lines.by_ref() {
        let pair: Vec<&str> = line.split(": ").collect();
        let [key, value] = pair[..] else { break };
        headers.insert(key.to_owned(), value.to_owned());
    }
    let body = lines.collect::<Vec<_>>().join(CRLF);

    let (route, query) = match target.split_once('?') {
        Some((route, query)) => (route, parse_query(query)),
        None => (target, HashMap::new()),
    };

    Ok(Request {
        version: version.to_owned(),
        method: method.to_owned(),
        route: matcher::normalize(route),
        params: HashMap::new(),
        query,
        headers,
        body: Body::from_payload(body),
    })
}

/// `a=1&b&a=2` → `{a: "2", b: ""}`. Later keys win.
fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .map(|pair| {
            let parts: Vec<&str> = pair.split('=').collect();
            let value = if parts.len() == 2 { parts[1] } else { "" };
            (parts[0].to_owned(), value.to_owned())
        })
        .collect()
}

/// Serialises `res` into one wire frame.
///
/// `Content-Length` is recomputed from the body and stored on `res` before
/// the headers are written.
pub fn encode(res: &mut Response) -> Bytes {
    let body = res.body.to_string();
    res.headers.insert("Content-Length".to_owned(), body.len().to_string());

    let status_line = format!("{} {} {}", res.version, res.status, status::reason(res.status));

    let mut buf = BytesMut::with_capacity(status_line.len() + body.len() + 128);
    buf.put_slice(status_line.as_bytes());
    buf.put_slice(CRLF.as_bytes());
    for (name, value) in &res.headers {
        buf.put_slice(format!("{name}: {value}{CRLF}").as_bytes());
    }
    buf.put_slice(CRLF.as_bytes());
    buf.put_slice(body.as_bytes());
    buf.put_slice(CRLF.as_bytes());
    buf.freeze()
}
