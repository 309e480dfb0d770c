//! Raw page queries and their validated form.

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Page size applied when a query omits `limit`.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size accepted unless configured otherwise.
pub const MAX_LIMIT: u32 = 100;

/// Raw pagination parameters as they arrive from a client.
///
/// Every field is optional; [`PageRequest::resolve`] fills the gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Requested page size.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of items to skip; must fall on a page boundary.
    #[serde(default)]
    pub offset: Option<u64>,
}

/// Caller-defined defaults used when resolving a [`PageQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    default_limit: u32,
    max_limit: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PageDefaults {
    /// Build defaults, requiring `1 <= default_limit <= max_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidDefaults`] when the bounds are
    /// inconsistent.
    pub const fn new(default_limit: u32, max_limit: u32) -> Result<Self, PaginationError> {
        if default_limit == 0 || default_limit > max_limit {
            return Err(PaginationError::InvalidDefaults {
                default_limit,
                max_limit,
            });
        }
        Ok(Self {
            default_limit,
            max_limit,
        })
    }

    /// Page size used when none is requested.
    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// Largest page size accepted.
    #[must_use]
    pub const fn max_limit(&self) -> u32 {
        self.max_limit
    }
}

/// A validated page request: `page >= 1` and `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request from an explicit page and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] or [`PaginationError::ZeroLimit`]
    /// for zero inputs.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        Ok(Self { page, limit })
    }

    /// Resolve a raw query against `defaults`.
    ///
    /// An offset on its own selects the page it starts. When both page and
    /// offset are present they must agree.
    ///
    /// # Errors
    ///
    /// Returns a [`PaginationError`] describing the first invalid parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageDefaults, PageQuery, PageRequest};
    ///
    /// let query = PageQuery { page: None, limit: Some(5), offset: Some(15) };
    /// let request = PageRequest::resolve(&query, &PageDefaults::default())?;
    /// assert_eq!(request.page(), 4);
    /// # Ok::<(), pagination::PaginationError>(())
    /// ```
    pub fn resolve(query: &PageQuery, defaults: &PageDefaults) -> Result<Self, PaginationError> {
        let limit = query.limit.unwrap_or(defaults.default_limit);
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        if limit > defaults.max_limit {
            return Err(PaginationError::LimitTooLarge {
                limit,
                max: defaults.max_limit,
            });
        }

        let page = match (query.page, query.offset) {
            (Some(page), None) => page,
            (None, None) => 1,
            (None, Some(offset)) => page_for_offset(offset, limit)?,
            (Some(page), Some(offset)) => {
                let derived = page_for_offset(offset, limit)?;
                if derived != page {
                    return Err(PaginationError::OffsetMismatch {
                        page,
                        offset,
                        limit,
                    });
                }
                page
            }
        };

        Self::new(page, limit)
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items preceding this page: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

fn page_for_offset(offset: u64, limit: u32) -> Result<u32, PaginationError> {
    let limit_wide = u64::from(limit);
    if offset.checked_rem(limit_wide) != Some(0) {
        return Err(PaginationError::UnalignedOffset { offset, limit });
    }
    offset
        .checked_div(limit_wide)
        .and_then(|index| u32::try_from(index).ok())
        .and_then(|index| index.checked_add(1))
        .ok_or(PaginationError::OffsetOutOfRange { offset })
}

#[cfg(test)]
mod tests {
    //! Resolution rules for raw page queries.

    use super::*;
    use rstest::rstest;

    fn query(page: Option<u32>, limit: Option<u32>, offset: Option<u64>) -> PageQuery {
        PageQuery {
            page,
            limit,
            offset,
        }
    }

    #[rstest]
    #[case(query(None, None, None), 1, DEFAULT_LIMIT)]
    #[case(query(Some(3), None, None), 3, DEFAULT_LIMIT)]
    #[case(query(Some(2), Some(10), None), 2, 10)]
    #[case(query(None, Some(10), Some(0)), 1, 10)]
    #[case(query(None, Some(10), Some(30)), 4, 10)]
    #[case(query(Some(4), Some(10), Some(30)), 4, 10)]
    #[case(query(None, Some(MAX_LIMIT), None), 1, MAX_LIMIT)]
    fn resolves_valid_queries(#[case] raw: PageQuery, #[case] page: u32, #[case] limit: u32) {
        let request = PageRequest::resolve(&raw, &PageDefaults::default()).expect("valid query");
        assert_eq!(request.page(), page);
        assert_eq!(request.limit(), limit);
    }

    #[rstest]
    #[case(query(Some(0), None, None), PaginationError::ZeroPage)]
    #[case(query(None, Some(0), None), PaginationError::ZeroLimit)]
    #[case(
        query(None, Some(MAX_LIMIT + 1), None),
        PaginationError::LimitTooLarge { limit: MAX_LIMIT + 1, max: MAX_LIMIT }
    )]
    #[case(
        query(None, Some(10), Some(15)),
        PaginationError::UnalignedOffset { offset: 15, limit: 10 }
    )]
    #[case(
        query(Some(2), Some(10), Some(30)),
        PaginationError::OffsetMismatch { page: 2, offset: 30, limit: 10 }
    )]
    fn rejects_invalid_queries(#[case] raw: PageQuery, #[case] expected: PaginationError) {
        let err = PageRequest::resolve(&raw, &PageDefaults::default()).expect_err("invalid query");
        assert_eq!(err, expected);
    }

    #[test]
    fn rejects_offsets_past_the_last_representable_page() {
        let offset = u64::from(u32::MAX) * 10;
        let err = PageRequest::resolve(&query(None, Some(10), Some(offset)), &PageDefaults::default())
            .expect_err("overflowing offset");
        assert_eq!(err, PaginationError::OffsetOutOfRange { offset });
    }

    #[test]
    fn offset_is_derived_from_page_and_limit() {
        let request = PageRequest::new(3, 25).expect("valid request");
        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn offset_does_not_overflow_for_large_pages() {
        let request = PageRequest::new(u32::MAX, u32::MAX).expect("valid request");
        assert_eq!(
            request.offset(),
            (u64::from(u32::MAX) - 1) * u64::from(u32::MAX)
        );
    }

    #[rstest]
    #[case(0, 10)]
    #[case(50, 10)]
    fn rejects_inconsistent_defaults(#[case] default_limit: u32, #[case] max_limit: u32) {
        assert_eq!(
            PageDefaults::new(default_limit, max_limit),
            Err(PaginationError::InvalidDefaults {
                default_limit,
                max_limit
            })
        );
    }

    #[test]
    fn configured_defaults_apply() {
        let defaults = PageDefaults::new(5, 10).expect("valid defaults");
        let request = PageRequest::resolve(&PageQuery::default(), &defaults).expect("defaults");
        assert_eq!(request.limit(), 5);

        let err = PageRequest::resolve(&query(None, Some(11), None), &defaults)
            .expect_err("above configured max");
        assert_eq!(err, PaginationError::LimitTooLarge { limit: 11, max: 10 });
    }

    #[test]
    fn query_deserializes_with_missing_fields() {
        let raw: PageQuery = serde_json::from_str(r#"{"limit":5}"#).expect("json");
        assert_eq!(raw, query(None, Some(5), None));
    }
}
