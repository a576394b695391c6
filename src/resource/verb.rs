//! Verbs
//!
//! The closed set of operations the service understands, and their HTTP methods.

use crate::error::Error;
use reqwest::Method;
use std::fmt;
use std::str::FromStr;

/// Operation requested on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Fetch,
    Create,
    Replace,
    Remove,
    Probe,
}

impl Verb {
    pub const ALL: [Verb; 5] = [
        Verb::Fetch,
        Verb::Create,
        Verb::Replace,
        Verb::Remove,
        Verb::Probe,
    ];

    /// Semantic name, e.g. `FETCH`
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Fetch => "FETCH",
            Verb::Create => "CREATE",
            Verb::Replace => "REPLACE",
            Verb::Remove => "REMOVE",
            Verb::Probe => "PROBE",
        }
    }

    /// HTTP method name, e.g. `GET`
    pub fn method_name(self) -> &'static str {
        match self {
            Verb::Fetch => "GET",
            Verb::Create => "POST",
            Verb::Replace => "PUT",
            Verb::Remove => "DELETE",
            Verb::Probe => "HEAD",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Verb::Fetch => Method::GET,
            Verb::Create => Method::POST,
            Verb::Replace => Method::PUT,
            Verb::Remove => Method::DELETE,
            Verb::Probe => Method::HEAD,
        }
    }

    /// Whether the verb encodes record parameters into the query string
    pub fn takes_record_params(self) -> bool {
        matches!(self, Verb::Create | Verb::Replace)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the semantic name or the HTTP method, ignoring ASCII case
/// and surrounding whitespace. The stock OstrichDB example clients only
/// accept upper-case method names; `"post"` is accepted here on purpose.
impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Verb::ALL
            .into_iter()
            .find(|verb| {
                trimmed.eq_ignore_ascii_case(verb.as_str())
                    || trimmed.eq_ignore_ascii_case(verb.method_name())
            })
            .ok_or_else(|| Error::UnsupportedVerb(s.to_string()))
    }
}
