//! Verb-Parameter Policy
//!
//! Checks only what can be proven locally: identifier components needed by
//! the target level, and the `type`/`value` parameters CREATE and REPLACE
//! need on a record. Verb/level combinations the service may or may not
//! support (CREATE on a collection, PROBE on the version endpoint, ...) are
//! left for the service to answer.

use super::identifier::{ResourceIdentifier, ResourceLevel};
use super::verb::Verb;
use crate::error::{Error, Result};

/// Optional record parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParams {
    /// Declared data type, e.g. `STRING`
    pub record_type: Option<String>,
    pub value: Option<String>,
}

impl RecordParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.record_type.is_none() && self.value.is_none()
    }
}

/// Handling of parameters a verb does not use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamMode {
    /// Ignore them, as the service's own clients do
    #[default]
    Lenient,
    /// Reject them with [`Error::SuperfluousParameter`]
    Strict,
}

/// Validate a request before it is rendered
pub fn validate(
    verb: Verb,
    level: ResourceLevel,
    identifier: &ResourceIdentifier,
    params: &RecordParams,
    mode: ParamMode,
) -> Result<()> {
    check_identifier(level, identifier)?;

    let consumes_type = level == ResourceLevel::Record && verb.takes_record_params();
    let consumes_value = level == ResourceLevel::Record && verb == Verb::Replace;

    if consumes_type && params.record_type.is_none() {
        return Err(Error::MissingParameter {
            verb,
            parameter: "type",
        });
    }
    if consumes_value && params.value.is_none() {
        return Err(Error::MissingParameter {
            verb,
            parameter: "value",
        });
    }

    if mode == ParamMode::Strict {
        if !consumes_type && params.record_type.is_some() {
            return Err(Error::SuperfluousParameter {
                verb,
                parameter: "type",
            });
        }
        if !consumes_value && params.value.is_some() {
            return Err(Error::SuperfluousParameter {
                verb,
                parameter: "value",
            });
        }
    }

    Ok(())
}

fn check_identifier(level: ResourceLevel, identifier: &ResourceIdentifier) -> Result<()> {
    let missing = |component| Err(Error::MissingIdentifier { level, component });

    if level == ResourceLevel::Version {
        return Ok(());
    }

    // Empty names count as absent
    let cluster = identifier.cluster_name().filter(|name| !name.is_empty());
    let record = identifier.record_name().filter(|name| !name.is_empty());

    if identifier.collection_name().is_empty() {
        return missing("collection");
    }
    // A record never stands without its cluster, whatever level is targeted
    if record.is_some() && cluster.is_none() {
        return missing("cluster");
    }
    if level == ResourceLevel::Collection {
        return Ok(());
    }
    if cluster.is_none() {
        return missing("cluster");
    }
    if level == ResourceLevel::Record && record.is_none() {
        return missing("record");
    }

    Ok(())
}
