//! Request execution seam
//!
//! The client hands a finished [`RequestTarget`] to a [`RequestExecutor`]
//! and gets back whatever the server said. Non-2xx statuses are ordinary
//! responses; only failures to send or read are errors.

use crate::error::Result;
use crate::resource::{RequestTarget, Verb};
use std::collections::BTreeMap;
use std::future::Future;

/// Raw response from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub verb: Verb,
    pub status: u16,
    /// Header names are lowercase; repeated headers are joined with `", "`
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// The part of a response a caller usually cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// PROBE responses carry no body; the headers are the answer
    Headers(&'a BTreeMap<String, String>),
    Body(&'a [u8]),
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn payload(&self) -> Payload<'_> {
        match self.verb {
            Verb::Probe => Payload::Headers(&self.headers),
            _ => Payload::Body(&self.body),
        }
    }

    /// Payload rendered for display: `name: value` lines for PROBE, body text otherwise
    pub fn payload_text(&self) -> String {
        match self.payload() {
            Payload::Headers(headers) => headers
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("\n"),
            Payload::Body(_) => self.text(),
        }
    }
}

/// Performs one network call per target
pub trait RequestExecutor: Send + Sync {
    fn execute(&self, target: &RequestTarget) -> impl Future<Output = Result<Response>> + Send;
}
