//! Page extraction and paginated responses for list endpoints.
//!
//! Handlers take a [`PageParams`] argument to receive a validated
//! [`PageRequest`] and answer with [`paginated_response`], which adds
//! navigation links derived from the request URL.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use futures_util::future::{Ready, ready};
use pagination::{PageDefaults, PageQuery, PageRequest, Paginated};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::PageSlice;

/// Validated page request taken from the query string.
///
/// Limits are resolved against the `web::Data<PageDefaults>` registered on
/// the app, or [`PageDefaults::default`] when none is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams(PageRequest);

impl PageParams {
    pub fn request(&self) -> &PageRequest {
        &self.0
    }

    pub fn into_inner(self) -> PageRequest {
        self.0
    }

    fn extract(req: &HttpRequest) -> Result<Self, Error> {
        let defaults = req
            .app_data::<web::Data<PageDefaults>>()
            .map_or_else(PageDefaults::default, |data| *data.get_ref());
        let query = web::Query::<PageQuery>::from_query(req.query_string()).map_err(|err| {
            debug!(error = %err, query = req.query_string(), "unreadable page query");
            Error::invalid_request("page, limit and offset must be non-negative integers")
                .with_details(json!({ "code": "invalid_page_query" }))
        })?;
        PageRequest::resolve(&query, &defaults)
            .map(Self)
            .map_err(Error::from)
    }
}

impl FromRequest for PageParams {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}

/// Package `slice` as `200 OK` with links built from the request URL.
///
/// # Errors
/// Fails when the slice cannot belong to `page`, which means the adapter
/// returned more items than requested.
pub fn paginated_response<T: Serialize>(
    req: &HttpRequest,
    page: &PageRequest,
    slice: PageSlice<T>,
) -> Result<HttpResponse, Error> {
    let envelope: Paginated<T> = slice.into_paginated(page)?;
    Ok(HttpResponse::Ok().json(envelope.with_links(&req.full_url())))
}
