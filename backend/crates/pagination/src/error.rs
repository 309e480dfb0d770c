//! Error type for page resolution and envelope construction.

use thiserror::Error;

/// Failures raised while resolving page requests or building envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The page size was zero.
    #[error("limit must be greater than zero")]
    ZeroLimit,
    /// The 1-based page number was zero.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The requested page size exceeds the configured ceiling.
    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge {
        /// Requested page size.
        limit: u32,
        /// Largest page size accepted.
        max: u32,
    },
    /// An offset that does not start a page boundary.
    #[error("offset {offset} is not a multiple of limit {limit}")]
    UnalignedOffset {
        /// Requested offset.
        offset: u64,
        /// Page size the offset was checked against.
        limit: u32,
    },
    /// Page and offset were both supplied and describe different pages.
    #[error("offset {offset} does not match page {page} with limit {limit}")]
    OffsetMismatch {
        /// Requested page.
        page: u32,
        /// Requested offset.
        offset: u64,
        /// Page size used for the comparison.
        limit: u32,
    },
    /// The offset addresses a page beyond the representable range.
    #[error("offset {offset} is out of range")]
    OffsetOutOfRange {
        /// Requested offset.
        offset: u64,
    },
    /// Configured defaults are inconsistent.
    #[error("default limit {default_limit} must be between 1 and {max_limit}")]
    InvalidDefaults {
        /// Configured default page size.
        default_limit: u32,
        /// Configured page size ceiling.
        max_limit: u32,
    },
    /// A page holds more items than its size permits.
    #[error("page holds {len} results but the limit is {limit}")]
    ResultsExceedLimit {
        /// Number of items supplied.
        len: usize,
        /// Page size.
        limit: u32,
    },
    /// A page holds more items than the reported total.
    #[error("page holds {len} results but the total is {total}")]
    ResultsExceedTotal {
        /// Number of items supplied.
        len: usize,
        /// Reported total.
        total: u64,
    },
}

impl PaginationError {
    /// Whether the error stems from caller input rather than an adapter bug.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::ResultsExceedLimit { .. }
                | Self::ResultsExceedTotal { .. }
                | Self::InvalidDefaults { .. }
        )
    }
}
