//! Pagination primitives shared by Bistro list endpoints.
//!
//! The crate stays free of web and persistence dependencies. Inbound adapters
//! deserialize a raw [`PageQuery`], resolve it into a validated
//! [`PageRequest`] using [`PageDefaults`], and repositories answer with the
//! page items plus the total count. [`Paginated`] then packages both into the
//! response envelope, optionally carrying navigation [`PageLinks`] derived
//! from the originating URL.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageDefaults, PageQuery, PageRequest, Paginated};
//!
//! let query = PageQuery { page: Some(2), limit: Some(10), offset: None };
//! let request = PageRequest::resolve(&query, &PageDefaults::default())?;
//! assert_eq!(request.offset(), 10);
//!
//! let page = Paginated::new(vec!["k", "l"], 25, &request)?;
//! assert_eq!(page.pages, 3);
//! assert!(page.has_next);
//! assert!(page.has_prev);
//! # Ok::<(), pagination::PaginationError>(())
//! ```

mod envelope;
mod error;
mod links;
mod metrics;
mod request;

pub use envelope::Paginated;
pub use error::PaginationError;
pub use links::PageLinks;
pub use metrics::{PageMetrics, paginate};
pub use request::{DEFAULT_LIMIT, MAX_LIMIT, PageDefaults, PageQuery, PageRequest};
