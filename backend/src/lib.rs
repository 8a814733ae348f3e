//! Movie catalogue: slug-addressed movies over pluggable storage.
//!
//! - [`domain`] holds the model, validation rules, and catalogue service.
//! - [`inbound`] exposes the catalogue over HTTP.
//! - [`outbound`] provides PostgreSQL and in-memory repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
