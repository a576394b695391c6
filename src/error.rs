//! Error types
//!
//! Local validation failures are raised before any network I/O; only
//! [`Error::Transport`] can come out of an actual request.

use crate::resource::{ResourceLevel, Verb};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by [`Error::Transport`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// A collection, cluster or record name required by the target level is absent
    #[error("missing {component} name for {level} target")]
    MissingIdentifier {
        level: ResourceLevel,
        component: &'static str,
    },

    /// A record parameter required by the verb is absent
    #[error("{verb} on a record requires the '{parameter}' parameter")]
    MissingParameter { verb: Verb, parameter: &'static str },

    /// Verb outside FETCH/CREATE/REPLACE/REMOVE/PROBE
    #[error("unsupported verb: {0}")]
    UnsupportedVerb(String),

    /// Strict mode only: a parameter the verb does not use was supplied
    #[error("{verb} does not accept the '{parameter}' parameter")]
    SuperfluousParameter { verb: Verb, parameter: &'static str },

    /// The request could not be sent or its response could not be read
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl Error {
    /// Wrap any failure raised by a request executor
    pub fn transport<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Transport(cause.into())
    }

    /// True for errors raised before any I/O was attempted
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

/// Longest transport cause shown to the user
const MAX_ERROR_LENGTH: usize = 80;

/// Format an error for display on the command line
pub fn format_error(error: &Error) -> String {
    match error {
        Error::Transport(cause) => {
            let cause = cause.to_string();
            if cause.contains("Connection refused") || cause.contains("error sending request") {
                return "Could not reach the OstrichDB server. Is it running?".to_string();
            }
            if cause.contains("timed out") {
                return "Request to the OstrichDB server timed out.".to_string();
            }

            // Keep the message on one line and short
            let printable: Vec<char> = cause
                .chars()
                .filter(|c| c.is_ascii_graphic() || *c == ' ')
                .collect();
            let shown: String = printable.iter().take(MAX_ERROR_LENGTH).collect();

            if printable.len() > MAX_ERROR_LENGTH {
                format!("Request failed: {}...", shown)
            } else {
                format!("Request failed: {}", shown)
            }
        }
        other => other.to_string(),
    }
}
