//! Segment-by-segment path pattern matching.
//!
//! A pattern segment starting with `:` binds exactly one request segment;
//! every other segment must be equal. Patterns and paths must have the same
//! number of segments.

use std::collections::HashMap;

/// Trims trailing `/` from `path`. Only the exact path `/` is kept as is;
/// `//` trims down to an empty path.
pub(crate) fn normalize(path: &str) -> String {
    if path == "/" {
        return path.to_owned();
    }
    path.trim_end_matches('/').to_owned()
}

/// Whether `pattern` contains at least one `:name` segment.
pub(crate) fn is_pattern(pattern: &str) -> bool {
    pattern.split('/').any(|segment| segment.starts_with(':'))
}

/// Matches `path` against `pattern`, returning the bound parameters.
///
/// ```rust
/// let params = courier::matcher::match_path("/foo/42/bar/7", "/foo/:id/bar/:id2").unwrap();
/// assert_eq!(params["id"], "42");
/// assert_eq!(params["id2"], "7");
///
/// assert!(courier::matcher::match_path("/foo/42/bar/7", "/foo/:id").is_none());
/// ```
pub fn match_path(path: &str, pattern: &str) -> Option<HashMap<String, String>> {
    let segments: Vec<&str> = path.split('/').collect();
    let tokens: Vec<&str> = pattern.split('/').collect();
    if segments.len() != tokens.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (segment, token) in segments.into_iter().zip(tokens) {
        match token.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), segment.to_owned());
            }
            None if segment == token => {}
            None => return None,
        }
    }
    Some(params)
}
