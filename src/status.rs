//! HTTP status codes courier knows a reason phrase for.
//!
//! Any `u16` can be set on a [`Response`](crate::Response); codes outside
//! this table go out with an empty reason phrase.
//!
//! ```rust
//! use courier::{Response, Status};
//!
//! let mut res = Response::default();
//! res.set_status(Status::Created);
//! assert_eq!(res.status(), 201);
//! ```

/// The status codes with a fixed reason phrase.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    Created,             // 201
    BadRequest,          // 400
    Unauthorized,        // 401
    Forbidden,           // 403
    NotFound,            // 404
    InternalServerError, // 500
    BadGateway,          // 502
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::Forbidden           => 403,
            Status::NotFound            => 404,
            Status::InternalServerError => 500,
            Status::BadGateway          => 502,
        }
    }
}

/// Reason phrase written on the status line.
///
/// 502 reads `SERVICE UNAVAILABLE` on the wire; clients that care only look
/// at the numeric code.
pub(crate) fn reason(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "CREATED",
        400 => "BAD REQUEST",
        401 => "UNAUTHORIZED",
        403 => "FORBIDDEN",
        404 => "NOT FOUND",
        500 => "INTERNAL SERVER ERROR",
        502 => "SERVICE UNAVAILABLE",
        _   => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_phrases_follow_the_fixed_table() {
        let table = [
            (Status::Ok, "OK"),
            (Status::Created, "CREATED"),
            (Status::BadRequest, "BAD REQUEST"),
            (Status::Unauthorized, "UNAUTHORIZED"),
            (Status::Forbidden, "FORBIDDEN"),
            (Status::NotFound, "NOT FOUND"),
            (Status::InternalServerError, "INTERNAL SERVER ERROR"),
            (Status::BadGateway, "SERVICE UNAVAILABLE"),
        ];
        for (status, phrase) in table {
            assert_eq!(reason(status.into()), phrase, "{status:?}");
        }
    }

    #[test]
    fn unlisted_codes_have_no_reason() {
        for code in [202, 204, 302, 418, 503] {
            assert_eq!(reason(code), "");
        }
    }
}
