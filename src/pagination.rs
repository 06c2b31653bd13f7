use axum::http::{HeaderMap, HeaderValue, header};
use log::warn;
use serde::Deserialize;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 50;
/// Highest page whose skip still fits the signed offsets Mongo accepts.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

#[derive(Deserialize, Default)]
pub struct Params {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// One extra document is fetched to tell whether a next page exists.
    pub fn fetch_limit(&self) -> i64 {
        (self.limit + 1) as i64
    }

    fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

impl From<Params> for Pagination {
    fn from(p: Params) -> Self {
        Self::new(p.page.unwrap_or(1), p.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Pagination>,
}

impl<T> Page<T> {
    /// Splits a result fetched with [`Pagination::fetch_limit`] into one page.
    pub fn from_fetched(mut items: Vec<T>, p: &Pagination) -> Self {
        let next = if items.len() as u64 > p.limit {
            items.truncate(p.limit as usize);
            Some(p.next())
        } else {
            None
        };

        Self { items, next }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }

    /// `Link` header pointing at the next page of `path`, when there is one.
    pub fn headers(&self, path: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(next) = &self.next {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("page", &next.page().to_string())
                .append_pair("limit", &next.limit().to_string())
                .finish();

            match HeaderValue::from_str(&format!("<{path}?{query}>; rel=\"next\"")) {
                Ok(v) => {
                    headers.insert(header::LINK, v);
                }
                Err(e) => warn!("could not build link header for {path}: {e:?}"),
            }
        }

        headers
    }
}
