//! Resource Address Builder
//!
//! Renders `{base}/c/{collection}/cl/{cluster}/r/{record}` style targets.
//! Identifier and parameter values are inserted verbatim unless
//! [`Encoding::Percent`] is selected, which changes what a literal-matching
//! server sees on the wire.

use super::identifier::{ResourceIdentifier, ResourceLevel};
use super::policy::{self, ParamMode, RecordParams};
use super::verb::Verb;
use crate::error::Result;
use std::borrow::Cow;
use std::fmt;

const COLLECTION_SEGMENT: &str = "c";
const CLUSTER_SEGMENT: &str = "cl";
const RECORD_SEGMENT: &str = "r";
const VERSION_PATH: &str = "/version";

/// How identifier and parameter values are written into the address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Insert values as given
    #[default]
    Verbatim,
    /// Percent-encode reserved characters
    Percent,
}

impl Encoding {
    fn apply<'a>(self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Encoding::Verbatim => Cow::Borrowed(raw),
            Encoding::Percent => urlencoding::encode(raw),
        }
    }
}

/// Fully rendered request destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    verb: Verb,
    base: String,
    path: String,
    query: Vec<(&'static str, String)>,
}

impl RequestTarget {
    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resource path, e.g. `/c/books/cl/fiction`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in wire order
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Rendered query string without the leading `?`
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        Some(parts.join("&"))
    }

    /// Complete address: base, path and query
    pub fn url(&self) -> String {
        match self.query_string() {
            Some(query) => format!("{}{}?{}", self.base, self.path, query),
            None => format!("{}{}", self.base, self.path),
        }
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb.method_name(), self.url())
    }
}

/// Builds request targets against one base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBuilder {
    base: String,
    encoding: Encoding,
    mode: ParamMode,
}

impl AddressBuilder {
    /// Base is scheme, host and port, e.g. `http://localhost:8042`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            encoding: Encoding::default(),
            mode: ParamMode::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_param_mode(mut self, mode: ParamMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn param_mode(&self) -> ParamMode {
        self.mode
    }

    /// Validate and render a target
    pub fn build(
        &self,
        identifier: &ResourceIdentifier,
        level: ResourceLevel,
        verb: Verb,
        params: &RecordParams,
    ) -> Result<RequestTarget> {
        policy::validate(verb, level, identifier, params, self.mode)?;

        let path = self.render_path(identifier, level);
        let query = self.render_query(level, verb, params);

        Ok(RequestTarget {
            verb,
            base: self.base.clone(),
            path,
            query,
        })
    }

    /// Target for the service version endpoint
    pub fn version(&self) -> RequestTarget {
        RequestTarget {
            verb: Verb::Fetch,
            base: self.base.clone(),
            path: VERSION_PATH.to_string(),
            query: Vec::new(),
        }
    }

    fn render_path(&self, identifier: &ResourceIdentifier, level: ResourceLevel) -> String {
        if level == ResourceLevel::Version {
            return VERSION_PATH.to_string();
        }

        let mut segments: Vec<(&str, &str)> =
            vec![(COLLECTION_SEGMENT, identifier.collection_name())];

        // validate() has already guaranteed the parts the level needs
        if matches!(level, ResourceLevel::Cluster | ResourceLevel::Record) {
            if let Some(cluster) = identifier.cluster_name() {
                segments.push((CLUSTER_SEGMENT, cluster));
            }
        }
        if level == ResourceLevel::Record {
            if let Some(record) = identifier.record_name() {
                segments.push((RECORD_SEGMENT, record));
            }
        }

        segments
            .into_iter()
            .map(|(literal, name)| format!("/{}/{}", literal, self.encoding.apply(name)))
            .collect()
    }

    fn render_query(
        &self,
        level: ResourceLevel,
        verb: Verb,
        params: &RecordParams,
    ) -> Vec<(&'static str, String)> {
        if level != ResourceLevel::Record {
            return Vec::new();
        }

        let mut query = Vec::new();
        match verb {
            Verb::Create => {
                if let Some(record_type) = &params.record_type {
                    query.push(("type", self.encoding.apply(record_type).into_owned()));
                }
            }
            Verb::Replace => {
                if let (Some(record_type), Some(value)) = (&params.record_type, &params.value) {
                    query.push(("type", self.encoding.apply(record_type).into_owned()));
                    query.push(("value", self.encoding.apply(value).into_owned()));
                }
            }
            Verb::Fetch | Verb::Remove | Verb::Probe => {}
        }
        query
    }
}

/// Build a target with the default (verbatim, lenient) options
pub fn build(
    base: &str,
    identifier: &ResourceIdentifier,
    level: ResourceLevel,
    verb: Verb,
    params: &RecordParams,
) -> Result<RequestTarget> {
    AddressBuilder::new(base).build(identifier, level, verb, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const BASE: &str = "http://localhost:8042";

    fn python_record() -> ResourceIdentifier {
        ResourceIdentifier::record("python_collection", "python_cluster", "python_record")
    }

    #[test]
    fn test_collection_path() {
        let target = build(
            BASE,
            &ResourceIdentifier::collection("python_collection"),
            ResourceLevel::Collection,
            Verb::Probe,
            &RecordParams::new(),
        )
        .unwrap();

        assert_eq!(target.url(), "http://localhost:8042/c/python_collection");
        assert!(target.query_string().is_none());
        assert_eq!(target.verb(), Verb::Probe);
    }

    #[test]
    fn test_cluster_path() {
        let target = build(
            BASE,
            &ResourceIdentifier::cluster("python_collection", "python_cluster"),
            ResourceLevel::Cluster,
            Verb::Fetch,
            &RecordParams::new(),
        )
        .unwrap();

        assert_eq!(target.path(), "/c/python_collection/cl/python_cluster");
    }

    #[test]
    fn test_collection_level_ignores_deeper_identifier_parts() {
        let target = build(
            BASE,
            &python_record(),
            ResourceLevel::Collection,
            Verb::Remove,
            &RecordParams::new(),
        )
        .unwrap();

        assert_eq!(target.path(), "/c/python_collection");
    }

    #[test]
    fn test_replace_record_query_order() {
        let params = RecordParams::new()
            .with_type("STRING")
            .with_value("Hello-World!");
        let target = build(
            BASE,
            &python_record(),
            ResourceLevel::Record,
            Verb::Replace,
            &params,
        )
        .unwrap();

        assert_eq!(
            target.url(),
            "http://localhost:8042/c/python_collection/cl/python_cluster/r/python_record?type=STRING&value=Hello-World!"
        );
    }

    #[test]
    fn test_create_record_appends_type_only() {
        let params = RecordParams::new().with_type("STRING").with_value("ignored");
        let target = build(
            BASE,
            &python_record(),
            ResourceLevel::Record,
            Verb::Create,
            &params,
        )
        .unwrap();

        assert!(target.url().ends_with("/r/python_record?type=STRING"));
    }

    #[test]
    fn test_non_writing_verbs_drop_params() {
        let params = RecordParams::new().with_type("STRING").with_value("x");
        for verb in [Verb::Fetch, Verb::Remove, Verb::Probe] {
            let target = build(BASE, &python_record(), ResourceLevel::Record, verb, &params)
                .unwrap();
            assert!(target.query().is_empty());
            assert!(!target.url().contains('?'));
        }
    }

    #[test]
    fn test_record_without_record_name_fails() {
        let err = build(
            BASE,
            &ResourceIdentifier::cluster("a", "b"),
            ResourceLevel::Record,
            Verb::Fetch,
            &RecordParams::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MissingIdentifier {
                level: ResourceLevel::Record,
                component: "record"
            }
        ));
    }

    #[test]
    fn test_empty_names_never_render_empty_segments() {
        for level in [ResourceLevel::Cluster, ResourceLevel::Record] {
            let err = build(
                BASE,
                &ResourceIdentifier::record("a", "", ""),
                level,
                Verb::Fetch,
                &RecordParams::new(),
            )
            .unwrap_err();
            assert!(matches!(err, Error::MissingIdentifier { .. }));
        }
    }

    #[test]
    fn test_record_without_cluster_is_rejected_at_collection_level() {
        let err = build(
            BASE,
            &ResourceIdentifier::collection("c").with_record("r"),
            ResourceLevel::Collection,
            Verb::Fetch,
            &RecordParams::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MissingIdentifier {
                level: ResourceLevel::Collection,
                component: "cluster"
            }
        ));
    }

    #[test]
    fn test_verbatim_encoding_keeps_reserved_characters() {
        let params = RecordParams::new().with_type("STRING").with_value("a b&c");
        let target = build(
            BASE,
            &ResourceIdentifier::record("my db", "cl", "r"),
            ResourceLevel::Record,
            Verb::Replace,
            &params,
        )
        .unwrap();

        assert_eq!(target.path(), "/c/my db/cl/cl/r/r");
        assert_eq!(target.query_string().unwrap(), "type=STRING&value=a b&c");
    }

    #[test]
    fn test_percent_encoding_escapes_reserved_characters() {
        let builder = AddressBuilder::new(BASE).with_encoding(Encoding::Percent);
        let params = RecordParams::new().with_type("STRING").with_value("a b&c=d");
        let target = builder
            .build(
                &ResourceIdentifier::record("my db", "x/y", "r?"),
                ResourceLevel::Record,
                Verb::Replace,
                &params,
            )
            .unwrap();

        assert_eq!(target.path(), "/c/my%20db/cl/x%2Fy/r/r%3F");
        assert_eq!(
            target.query_string().unwrap(),
            "type=STRING&value=a%20b%26c%3Dd"
        );
    }

    #[test]
    fn test_version_target() {
        let builder = AddressBuilder::new(BASE);
        let target = builder.version();
        assert_eq!(target.url(), "http://localhost:8042/version");
        assert_eq!(target.verb(), Verb::Fetch);

        let via_build = builder
            .build(
                &ResourceIdentifier::collection("ignored"),
                ResourceLevel::Version,
                Verb::Fetch,
                &RecordParams::new(),
            )
            .unwrap();
        assert_eq!(via_build, target);
    }

    #[test]
    fn test_build_is_pure() {
        let params = RecordParams::new().with_type("STRING");
        let first = build(BASE, &python_record(), ResourceLevel::Record, Verb::Create, &params);
        let second = build(BASE, &python_record(), ResourceLevel::Record, Verb::Create, &params);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_display_shows_method_and_url() {
        let target = AddressBuilder::new(BASE).version();
        assert_eq!(target.to_string(), "GET http://localhost:8042/version");
    }
}
