//! OstrichDB API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main client combining address building and execution
//! - [`executor`] - The [`RequestExecutor`] seam and the [`Response`] it returns
//! - [`http`] - reqwest-backed executor
//!
//! # Example
//!
//! ```no_run
//! use ostrich_client::ostrich::OstrichClient;
//! use ostrich_client::resource::{RecordParams, ResourceIdentifier};
//!
//! async fn example() -> ostrich_client::Result<()> {
//!     let client = OstrichClient::new("http://localhost:8042")?;
//!     let id = ResourceIdentifier::record("books", "fiction", "dune");
//!     let params = RecordParams::new().with_type("STRING");
//!     let response = client.record_action("POST", &id, &params).await?;
//!     println!("{}", response.status);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod executor;
pub mod http;

pub use client::OstrichClient;
pub use executor::{Payload, RequestExecutor, Response};
pub use http::OstrichHttpClient;
