//! Resource addressing
//!
//! Turns an identifier, a verb and optional record parameters into a
//! [`RequestTarget`]. Everything here is pure and safe to call from any
//! number of tasks at once.
//!
//! # Architecture
//!
//! - [`identifier`] - collection / cluster / record triples and target levels
//! - [`verb`] - the closed verb set and its HTTP methods
//! - [`policy`] - locally checkable request invariants
//! - [`target`] - path and query rendering
//!
//! # Example
//!
//! ```
//! use ostrich_client::resource::{build, RecordParams, ResourceIdentifier, ResourceLevel, Verb};
//!
//! let id = ResourceIdentifier::record("books", "fiction", "dune");
//! let params = RecordParams::new().with_type("STRING").with_value("Herbert");
//! let target = build("http://localhost:8042", &id, ResourceLevel::Record, Verb::Replace, &params)?;
//! assert_eq!(
//!     target.url(),
//!     "http://localhost:8042/c/books/cl/fiction/r/dune?type=STRING&value=Herbert"
//! );
//! # Ok::<(), ostrich_client::Error>(())
//! ```

pub mod identifier;
pub mod policy;
pub mod target;
pub mod verb;

pub use identifier::{ResourceIdentifier, ResourceLevel};
pub use policy::{validate, ParamMode, RecordParams};
pub use target::{build, AddressBuilder, Encoding, RequestTarget};
pub use verb::Verb;
