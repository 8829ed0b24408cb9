//! Record management backend.
//!
//! Layout follows ports and adapters: [`domain`] holds the ingest and update
//! pipelines behind port traits, [`inbound`] exposes them over HTTP and
//! [`outbound`] provides storage and spreadsheet adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
