//! HTTP transport for OstrichDB requests

use super::executor::{RequestExecutor, Response};
use crate::error::{Error, Result};
use crate::resource::RequestTarget;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("ostrich-client/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// reqwest-backed executor
#[derive(Clone)]
pub struct OstrichHttpClient {
    client: Client,
}

impl OstrichHttpClient {
    /// Create a new HTTP client with no request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a new HTTP client; `timeout` bounds each whole request
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    async fn send(&self, target: &RequestTarget) -> Result<Response> {
        let verb = target.verb();
        let url = target.url();
        tracing::debug!("{} {}", verb.method_name(), url);

        let response = self
            .client
            .request(verb.method(), &url)
            .header(CONTENT_TYPE, "text/plain")
            .send()
            .await?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        tracing::debug!("{} {} -> {}", verb.method_name(), url, status);
        if !status.is_success() {
            tracing::warn!(
                "OstrichDB responded {} - {}",
                status,
                sanitize_for_log(&String::from_utf8_lossy(&body))
            );
        }

        Ok(Response {
            verb,
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl RequestExecutor for OstrichHttpClient {
    async fn execute(&self, target: &RequestTarget) -> Result<Response> {
        let result = self.send(target).await;
        if let Err(Error::Transport(cause)) = &result {
            tracing::error!("Request {} failed: {}", target, cause);
        }
        result
    }
}
