//! Navigation links derived from the originating request URL.

use serde::{Deserialize, Serialize};
use url::Url;

const PAGE_PARAMS: [&str; 3] = ["page", "limit", "offset"];

/// Absolute URLs for navigating a paginated collection.
///
/// Every link keeps the originating query parameters and rewrites only
/// `page` and `limit`; any incoming `offset` is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// The page that was served.
    #[serde(rename = "self")]
    pub self_: String,
    /// The following page, when one holds items.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next: Option<String>,
    /// The preceding page, when one holds items.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub prev: Option<String>,
    /// The first page.
    pub first: String,
    /// The last page; page 1 when the collection is empty.
    pub last: String,
}

impl PageLinks {
    /// Build links for `page` of `pages` from `route`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageLinks;
    /// use url::Url;
    ///
    /// let route = Url::parse("https://api.example/restaurants?city=oslo").expect("url");
    /// let links = PageLinks::build(&route, 2, 10, 3, true, true);
    /// assert_eq!(
    ///     links.next.as_deref(),
    ///     Some("https://api.example/restaurants?city=oslo&page=3&limit=10")
    /// );
    /// ```
    #[must_use]
    pub fn build(
        route: &Url,
        page: u32,
        limit: u32,
        pages: u64,
        has_next: bool,
        has_prev: bool,
    ) -> Self {
        let last = u32::try_from(pages.max(1)).unwrap_or(u32::MAX);
        Self {
            self_: page_url(route, page, limit),
            next: has_next.then(|| page_url(route, page.saturating_add(1), limit)),
            prev: has_prev.then(|| page_url(route, page.saturating_sub(1).max(1), limit)),
            first: page_url(route, 1, limit),
            last: page_url(route, last, limit),
        }
    }
}

fn page_url(route: &Url, page: u32, limit: u32) -> String {
    let retained: Vec<(String, String)> = route
        .query_pairs()
        .filter(|(key, _)| !PAGE_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = route.clone();
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    url.into()
}

#[cfg(test)]
mod tests {
    //! Link construction against varied originating URLs.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn route() -> Url {
        Url::parse("https://api.example/v1/reviews?restaurant=abc&page=9&offset=80&limit=10")
            .expect("valid url")
    }

    #[rstest]
    fn middle_page_links_all_directions(route: Url) {
        let links = PageLinks::build(&route, 2, 10, 3, true, true);
        assert_eq!(
            links.self_,
            "https://api.example/v1/reviews?restaurant=abc&page=2&limit=10"
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("https://api.example/v1/reviews?restaurant=abc&page=1&limit=10")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("https://api.example/v1/reviews?restaurant=abc&page=3&limit=10")
        );
        assert_eq!(
            links.last,
            "https://api.example/v1/reviews?restaurant=abc&page=3&limit=10"
        );
    }

    #[rstest]
    fn empty_collection_points_last_at_first_page(route: Url) {
        let links = PageLinks::build(&route, 1, 10, 0, false, false);
        assert_eq!(links.first, links.last);
        assert!(links.next.is_none());
        assert!(links.prev.is_none());
    }

    #[test]
    fn route_without_query_gains_page_parameters() {
        let route = Url::parse("http://localhost:8080/tables#top").expect("valid url");
        let links = PageLinks::build(&route, 1, 5, 1, false, false);
        assert_eq!(links.self_, "http://localhost:8080/tables?page=1&limit=5");
    }

    #[test]
    fn serializes_self_key() {
        let route = Url::parse("http://localhost/menu").expect("valid url");
        let value = serde_json::to_value(PageLinks::build(&route, 1, 5, 1, false, false))
            .expect("serialize");
        assert_eq!(value["self"], "http://localhost/menu?page=1&limit=5");
        assert!(value.get("next").is_none());
    }
}
