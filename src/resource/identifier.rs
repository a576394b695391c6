//! Resource identifiers
//!
//! A collection name, optionally narrowed to a cluster and then a record.

use crate::error::{Error, Result};
use std::fmt;

/// Level of the resource hierarchy a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLevel {
    /// The service itself (`/version`); takes no identifier
    Version,
    Collection,
    Cluster,
    Record,
}

impl ResourceLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceLevel::Version => "Version",
            ResourceLevel::Collection => "Collection",
            ResourceLevel::Cluster => "Cluster",
            ResourceLevel::Record => "Record",
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceLevel::Version => "version",
            ResourceLevel::Collection => "collection",
            ResourceLevel::Cluster => "cluster",
            ResourceLevel::Record => "record",
        };
        f.write_str(name)
    }
}

/// (collection, cluster, record) triple
///
/// Equality is structural and case-sensitive. [`try_new`](Self::try_new)
/// refuses a record without its cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    collection: String,
    cluster: Option<String>,
    record: Option<String>,
}

impl ResourceIdentifier {
    /// Identify a whole collection
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            cluster: None,
            record: None,
        }
    }

    /// Identify a cluster within a collection
    pub fn cluster(collection: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self::collection(collection).with_cluster(cluster)
    }

    /// Identify a record within a cluster
    pub fn record(
        collection: impl Into<String>,
        cluster: impl Into<String>,
        record: impl Into<String>,
    ) -> Self {
        Self::cluster(collection, cluster).with_record(record)
    }

    /// Build from optional parts, rejecting empty names and a record
    /// without a cluster
    pub fn try_new(
        collection: impl Into<String>,
        cluster: Option<String>,
        record: Option<String>,
    ) -> Result<Self> {
        let level = if record.is_some() {
            ResourceLevel::Record
        } else if cluster.is_some() {
            ResourceLevel::Cluster
        } else {
            ResourceLevel::Collection
        };

        let collection = collection.into();
        if collection.is_empty() {
            return Err(Error::MissingIdentifier {
                level,
                component: "collection",
            });
        }
        if cluster.as_deref() == Some("") {
            return Err(Error::MissingIdentifier {
                level,
                component: "cluster",
            });
        }
        if record.as_deref() == Some("") {
            return Err(Error::MissingIdentifier {
                level,
                component: "record",
            });
        }
        if record.is_some() && cluster.is_none() {
            return Err(Error::MissingIdentifier {
                level,
                component: "cluster",
            });
        }

        Ok(Self {
            collection,
            cluster,
            record,
        })
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Narrow to a record. Only meaningful once a cluster is set; builders
    /// reject an identifier carrying a record but no cluster at every level.
    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    pub fn record_name(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Deepest level this identifier can address
    pub fn level(&self) -> ResourceLevel {
        match (&self.cluster, &self.record) {
            (Some(_), Some(_)) => ResourceLevel::Record,
            (Some(_), None) => ResourceLevel::Cluster,
            _ => ResourceLevel::Collection,
        }
    }
}
