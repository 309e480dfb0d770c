//! The paginated response envelope.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{PageLinks, PageRequest, PaginationError, paginate};

/// One page of results plus the metadata needed to fetch further pages.
///
/// ## Invariants
/// - `results.len() <= limit` and `results.len() <= total`.
/// - `offset == (page - 1) * limit`.
/// - `pages == ceil(total / limit)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on this page, in collection order.
    pub results: Vec<T>,
    /// Count of all matching items.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Items preceding this page.
    pub offset: u64,
    /// Number of pages.
    pub pages: u64,
    /// A later page holds items.
    pub has_next: bool,
    /// An earlier page holds items.
    pub has_prev: bool,
    /// Navigation links, present only when a route was supplied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub links: Option<PageLinks>,
}

impl<T> Paginated<T> {
    /// Package `results` as the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ResultsExceedLimit`] or
    /// [`PaginationError::ResultsExceedTotal`] when the items cannot belong
    /// to the requested page.
    pub fn new(results: Vec<T>, total: u64, request: &PageRequest) -> Result<Self, PaginationError> {
        let limit = request.limit();
        let len = results.len();
        if u64::try_from(len).map_or(true, |count| count > u64::from(limit)) {
            return Err(PaginationError::ResultsExceedLimit { len, limit });
        }
        if u64::try_from(len).map_or(true, |count| count > total) {
            return Err(PaginationError::ResultsExceedTotal { len, total });
        }

        let metrics = paginate(total, request.page(), limit)?;
        Ok(Self {
            results,
            total,
            page: request.page(),
            limit,
            offset: request.offset(),
            pages: metrics.pages,
            has_next: metrics.has_next,
            has_prev: metrics.has_prev,
            links: None,
        })
    }

    /// An empty page for `request`.
    #[must_use]
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            page: request.page(),
            limit: request.limit(),
            offset: request.offset(),
            pages: 0,
            has_next: false,
            has_prev: false,
            links: None,
        }
    }

    /// Attach navigation links built from the originating `route`.
    #[must_use]
    pub fn with_links(mut self, route: &Url) -> Self {
        self.links = Some(PageLinks::build(
            route,
            self.page,
            self.limit,
            self.pages,
            self.has_next,
            self.has_prev,
        ));
        self
    }

    /// Convert every result while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            offset: self.offset,
            pages: self.pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
            links: self.links,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Envelope construction and serialisation.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn request(page: u32, limit: u32) -> PageRequest {
        PageRequest::new(page, limit).expect("valid request")
    }

    #[test]
    fn builds_middle_page() {
        let page = Paginated::new(vec![11, 12, 13], 25, &request(2, 10)).expect("page");
        assert_eq!(page.offset, 10);
        assert_eq!(page.pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
        assert!(page.links.is_none());
    }

    #[test]
    fn empty_total_has_no_pages() {
        let page = Paginated::<u8>::new(Vec::new(), 0, &request(1, 10)).expect("page");
        assert_eq!(page, Paginated::empty(&request(1, 10)));
        assert!(!page.has_next && !page.has_prev);
    }

    #[rstest]
    #[case(vec![1, 2, 3], 10, 2, PaginationError::ResultsExceedLimit { len: 3, limit: 2 })]
    #[case(vec![1, 2], 1, 5, PaginationError::ResultsExceedTotal { len: 2, total: 1 })]
    #[case(vec![1], 0, 5, PaginationError::ResultsExceedTotal { len: 1, total: 0 })]
    fn rejects_impossible_pages(
        #[case] results: Vec<u8>,
        #[case] total: u64,
        #[case] limit: u32,
        #[case] expected: PaginationError,
    ) {
        let err = Paginated::new(results, total, &request(1, limit)).expect_err("invalid page");
        assert_eq!(err, expected);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Paginated::new(vec![1, 2], 7, &request(3, 2)).expect("page");
        let mapped = page.clone().map(|value| value.to_string());
        assert_eq!(mapped.results, vec!["1".to_owned(), "2".to_owned()]);
        assert_eq!(mapped.pages, page.pages);
        assert_eq!(mapped.offset, 4);
    }

    #[test]
    fn serializes_camel_case_with_links() {
        let route = Url::parse("https://api.example/menu").expect("url");
        let page = Paginated::new(vec!["soup"], 3, &request(2, 1))
            .expect("page")
            .with_links(&route);
        let value = serde_json::to_value(&page).expect("serialize");
        assert_eq!(value["hasNext"], json!(true));
        assert_eq!(value["hasPrev"], json!(true));
        assert_eq!(value["links"]["prev"], json!("https://api.example/menu?page=1&limit=1"));
        assert_eq!(value["links"]["last"], json!("https://api.example/menu?page=3&limit=1"));
    }

    #[test]
    fn omits_links_without_route() {
        let page = Paginated::new(vec![1], 1, &request(1, 1)).expect("page");
        let value = serde_json::to_value(&page).expect("serialize");
        assert!(value.get("links").is_none());
    }
}
