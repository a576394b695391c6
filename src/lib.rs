//! Client library for the OstrichDB HTTP API
//!
//! OstrichDB stores records inside clusters inside collections. This crate
//! renders the addresses for those resources, checks the parameters each
//! verb needs, and sends the request.
//!
//! - [`resource`] - pure addressing and validation
//! - [`ostrich`] - client and HTTP transport
//! - [`config`] - persisted defaults used by the `ostc` binary

pub mod config;
pub mod error;
pub mod ostrich;
pub mod resource;

pub use error::{format_error, Error, Result};
pub use ostrich::{OstrichClient, RequestExecutor, Response};
pub use resource::{
    build, AddressBuilder, Encoding, ParamMode, RecordParams, RequestTarget, ResourceIdentifier,
    ResourceLevel, Verb,
};
