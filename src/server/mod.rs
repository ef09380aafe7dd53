//! Mock data service for running the worklist without a backend
//!
//! `MockServerBuilder` reads the application manifest, the service metadata
//! and the fixture rows, and exposes them over HTTP in the OData v2 JSON
//! format under the main data source's root URI.

pub mod builder;
pub mod handlers;
pub mod host;
pub mod query;
pub mod router;

pub use builder::MockServerBuilder;
pub use host::MockServerHost;
pub use query::{ListQuery, Page};
pub use router::build_router;
