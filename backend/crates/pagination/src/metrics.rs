//! Page count and navigation flags.

use crate::PaginationError;

/// Navigation metadata derived from a total count and a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    /// Number of pages, `ceil(total / limit)`; zero when nothing matched.
    pub pages: u64,
    /// A later page holds items.
    pub has_next: bool,
    /// An earlier page holds items.
    pub has_prev: bool,
}

/// Compute page metrics for `total` items viewed `limit` at a time.
///
/// With `total = 0` there are no pages and neither flag is set, whichever
/// page was requested.
///
/// # Errors
///
/// Returns [`PaginationError::ZeroLimit`] or [`PaginationError::ZeroPage`]
/// before any division takes place.
///
/// # Examples
///
/// ```
/// use pagination::paginate;
///
/// let metrics = paginate(25, 2, 10)?;
/// assert_eq!(metrics.pages, 3);
/// assert!(metrics.has_next && metrics.has_prev);
/// # Ok::<(), pagination::PaginationError>(())
/// ```
pub const fn paginate(total: u64, page: u32, limit: u32) -> Result<PageMetrics, PaginationError> {
    if limit == 0 {
        return Err(PaginationError::ZeroLimit);
    }
    if page == 0 {
        return Err(PaginationError::ZeroPage);
    }

    let pages = total.div_ceil(limit as u64);
    Ok(PageMetrics {
        pages,
        has_next: (page as u64) < pages,
        has_prev: total > 0 && page > 1,
    })
}
