//! Request and response payloads.

use std::fmt;

use serde_json::Value;

/// A message body.
///
/// Request bodies that parse as JSON arrive as [`Body::Json`]; everything
/// else is kept verbatim as [`Body::Text`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Json(Value),
}

impl Body {
    /// Builds a request body from the raw text after the header block.
    ///
    /// Invalid JSON is not an error; the text is kept as-is.
    pub(crate) fn from_payload(raw: String) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the text if this is a [`Body::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the decoded value if this is a [`Body::Json`].
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Wire form of the body.
///
/// A JSON value is written as a JSON *string* holding the serialised value,
/// so `{"a":"b"}` goes out as `"{\"a\":\"b\"}"`.
impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{}", Value::String(v.to_string())),
        }
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Body {
    fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Value> for Body {
    fn from(v: Value) -> Self { Self::Json(v) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_payload_is_decoded() {
        let body = Body::from_payload(r#"{"name":"alice"}"#.to_owned());
        assert_eq!(body.as_json(), Some(&json!({"name": "alice"})));
    }

    #[test]
    fn invalid_json_falls_back_to_text() {
        let body = Body::from_payload("{not json".to_owned());
        assert_eq!(body.as_text(), Some("{not json"));
    }

    #[test]
    fn empty_payload_is_empty() {
        assert!(Body::from_payload(String::new()).is_empty());
    }

    #[test]
    fn conversions_pick_the_variant() {
        assert_eq!(Body::from("hi"), Body::Text("hi".to_owned()));
        assert_eq!(Body::from(String::from("hi")).as_text(), Some("hi"));
        assert_eq!(Body::from(json!([1, 2])).as_json(), Some(&json!([1, 2])));
    }

    #[test]
    fn json_is_written_as_escaped_string() {
        let body = Body::Json(json!({"message": "x"}));
        assert_eq!(body.to_string(), r#""{\"message\":\"x\"}""#);
    }
}
