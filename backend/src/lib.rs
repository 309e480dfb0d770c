//! Bistro restaurant-management backend.
//!
//! Layers follow a hexagonal layout:
//! - [`domain`]: entities, validation, services and the ports they depend on.
//! - [`outbound`]: in-memory and Diesel/PostgreSQL repository adapters.
//! - [`inbound`]: HTTP error rendering, pagination extraction and health
//!   probes.
//! - [`registry`]: wires services over one storage backend.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod registry;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use registry::ServiceRegistry;
