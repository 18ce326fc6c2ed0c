//! Request methods a route can be registered under.
//!
//! The request line keeps the method as text; it is parsed into a [`Method`]
//! only at lookup time. Text that names no variant cannot match any route.

use std::fmt;
use std::str::FromStr;

macro_rules! methods {
    ($($variant:ident => $token:literal,)+) => {
        /// Verb half of a route key.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Method {
            $($variant,)+
        }

        impl Method {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Method] = &[$(Method::$variant,)+];

            /// Token as it appears on the request line.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Method::$variant => $token,)+
                }
            }
        }

        /// Exact, case-sensitive token match: `get` is not `GET`.
        impl FromStr for Method {
            type Err = ();

            fn from_str(token: &str) -> Result<Self, ()> {
                match token {
                    $($token => Ok(Method::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

methods! {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Patch => "PATCH",
    Delete => "DELETE",
    Head => "HEAD",
    Options => "OPTIONS",
    Connect => "CONNECT",
    Trace => "TRACE",
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
