//! OstrichDB Client
//!
//! Main client for talking to an OstrichDB server, combining address
//! building with a request executor.

use super::executor::{RequestExecutor, Response};
use super::http::OstrichHttpClient;
use crate::error::Result;
use crate::resource::{AddressBuilder, RecordParams, ResourceIdentifier, ResourceLevel, Verb};

/// Main OstrichDB client
#[derive(Clone)]
pub struct OstrichClient<E = OstrichHttpClient> {
    builder: AddressBuilder,
    executor: E,
}

impl OstrichClient<OstrichHttpClient> {
    /// Create a client for `base` using the reqwest executor
    pub fn new(base: impl Into<String>) -> Result<Self> {
        Ok(Self::with_executor(
            AddressBuilder::new(base),
            OstrichHttpClient::new()?,
        ))
    }
}

impl<E: RequestExecutor> OstrichClient<E> {
    pub fn with_executor(builder: AddressBuilder, executor: E) -> Self {
        Self { builder, executor }
    }

    pub fn builder(&self) -> &AddressBuilder {
        &self.builder
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch the server version text
    pub async fn version(&self) -> Result<Response> {
        self.executor.execute(&self.builder.version()).await
    }

    /// Validate, render and send one request
    ///
    /// Validation failures return before the executor is touched.
    pub async fn request(
        &self,
        identifier: &ResourceIdentifier,
        level: ResourceLevel,
        verb: Verb,
        params: &RecordParams,
    ) -> Result<Response> {
        let target = self.builder.build(identifier, level, verb, params)?;
        self.executor.execute(&target).await
    }

    /// Same as [`request`](Self::request) with the verb given as text,
    /// e.g. `"PUT"` or `"REPLACE"`
    pub async fn request_str(
        &self,
        identifier: &ResourceIdentifier,
        level: ResourceLevel,
        verb: &str,
        params: &RecordParams,
    ) -> Result<Response> {
        let verb: Verb = verb.parse()?;
        self.request(identifier, level, verb, params).await
    }

    /// Perform an action on a collection as a whole
    pub async fn collection_action(
        &self,
        verb: &str,
        identifier: &ResourceIdentifier,
    ) -> Result<Response> {
        self.request_str(
            identifier,
            ResourceLevel::Collection,
            verb,
            &RecordParams::new(),
        )
        .await
    }

    /// Perform an action on a cluster within a collection
    pub async fn cluster_action(
        &self,
        verb: &str,
        identifier: &ResourceIdentifier,
    ) -> Result<Response> {
        self.request_str(identifier, ResourceLevel::Cluster, verb, &RecordParams::new())
            .await
    }

    /// Perform an action on a record within a cluster
    pub async fn record_action(
        &self,
        verb: &str,
        identifier: &ResourceIdentifier,
        params: &RecordParams,
    ) -> Result<Response> {
        self.request_str(identifier, ResourceLevel::Record, verb, params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resource::RequestTarget;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Executor double that records every target it is asked to send
    #[derive(Default)]
    struct RecordingExecutor {
        sent: Mutex<Vec<RequestTarget>>,
        status: u16,
        fail: bool,
    }

    impl RecordingExecutor {
        fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl RequestExecutor for RecordingExecutor {
        async fn execute(&self, target: &RequestTarget) -> Result<Response> {
            self.sent.lock().unwrap().push(target.clone());
            if self.fail {
                return Err(Error::transport("connection refused"));
            }
            Ok(Response {
                verb: target.verb(),
                status: self.status,
                headers: BTreeMap::new(),
                body: target.url().into_bytes(),
            })
        }
    }

    fn client(executor: RecordingExecutor) -> OstrichClient<RecordingExecutor> {
        OstrichClient::with_executor(AddressBuilder::new("http://localhost:8042"), executor)
    }

    fn record() -> ResourceIdentifier {
        ResourceIdentifier::record("python_collection", "python_cluster", "python_record")
    }

    #[test]
    fn test_unsupported_verb_never_reaches_executor() {
        let client = client(RecordingExecutor::default());

        let err = tokio_test::block_on(client.record_action("PATCH", &record(), &RecordParams::new()))
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedVerb(ref v) if v == "PATCH"));
        assert_eq!(client.executor().calls(), 0);
    }

    #[test]
    fn test_validation_failure_never_reaches_executor() {
        let client = client(RecordingExecutor::default());

        let err = tokio_test::block_on(client.record_action("PUT", &record(), &RecordParams::new()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { .. }));

        let err = tokio_test::block_on(
            client.cluster_action("GET", &ResourceIdentifier::collection("python_collection")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier { .. }));

        assert_eq!(client.executor().calls(), 0);
    }

    #[test]
    fn test_record_action_sends_rendered_target() {
        let client = client(RecordingExecutor {
            status: 200,
            ..Default::default()
        });
        let params = RecordParams::new()
            .with_type("STRING")
            .with_value("Hello-World!");

        let resp = tokio_test::block_on(client.record_action("PUT", &record(), &params)).unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.verb, Verb::Replace);
        assert_eq!(
            resp.text(),
            "http://localhost:8042/c/python_collection/cl/python_cluster/r/python_record?type=STRING&value=Hello-World!"
        );
        assert_eq!(client.executor().calls(), 1);
    }

    #[test]
    fn test_error_status_is_not_an_error() {
        let client = client(RecordingExecutor {
            status: 404,
            ..Default::default()
        });

        let resp = tokio_test::block_on(
            client.collection_action("HEAD", &ResourceIdentifier::collection("missing")),
        )
        .unwrap();

        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
    }

    #[test]
    fn test_transport_failure_is_typed() {
        let client = client(RecordingExecutor {
            fail: true,
            ..Default::default()
        });

        let err = tokio_test::block_on(client.version()).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(client.executor().calls(), 1);
    }

    #[test]
    fn test_version_uses_version_path() {
        let client = client(RecordingExecutor {
            status: 200,
            ..Default::default()
        });

        tokio_test::block_on(client.version()).unwrap();

        let sent = client.executor().sent.lock().unwrap();
        assert_eq!(sent[0].path(), "/version");
        assert_eq!(sent[0].verb(), Verb::Fetch);
    }
}
