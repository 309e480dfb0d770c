//! HTTP inbound adapter.
//!
//! Feature controllers are not exposed yet; this layer provides the pieces
//! they build on: domain error rendering, page extraction with linked
//! responses, and the health probes.

pub mod error;
pub mod health;
pub mod pagination;

pub use error::ApiResult;
pub use pagination::{PageParams, paginated_response};
