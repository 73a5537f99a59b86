//! Query-string construction.
//!
//! [`PageRequest`] collects the pagination parameters and filters for one
//! call; [`build_query`] turns them into the `limit=..&page=..&<filters>`
//! string sent to the API.
//!
//! Field names and filter values are percent-encoded for the characters
//! that would otherwise split or truncate the query (`&`, `=`, `#`, `+`,
//! `%`, whitespace, non-ASCII). Operator tokens, commas (list values) and
//! slashes (regex literals) are left as-is, so plain filters render exactly
//! as their [`Display`](std::fmt::Display) form.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ClientError;
use crate::filter::Filter;
use crate::model::Model;

/// Characters escaped inside a field name or filter value.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Characters escaped inside a single path segment (resource ids).
///
/// `\` is included because URL parsing treats it as `/` for http(s).
const PATH_SEGMENT: &AsciiSet = &QUERY_COMPONENT
    .add(b'/')
    .add(b'\\')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Pagination and filters for a collection request.
///
/// ## Examples
///
/// ```rust
/// use fellowship::{Filter, FilterOperator, PageRequest};
/// use fellowship::model::{Quote, QuoteField};
///
/// let request = PageRequest::<Quote>::new()
///     .limit(2)
///     .page(2)
///     .filter(Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("/ring/i"))?);
///
/// assert_eq!(request.path_and_query("quote"), "quote?limit=2&page=2&dialog=/ring/i");
/// # Ok::<(), fellowship::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<M: Model> {
    limit: Option<u32>,
    page: Option<u32>,
    filters: Vec<Filter<M>>,
}

impl<M: Model> Default for PageRequest<M> {
    fn default() -> Self {
        Self {
            limit: None,
            page: None,
            filters: Vec::new(),
        }
    }
}

impl<M: Model> PageRequest<M> {
    /// An unpaginated, unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets or clears the page size.
    #[must_use]
    pub fn maybe_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Sets or clears the page number.
    #[must_use]
    pub fn maybe_page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }

    /// Appends a filter. Filters are sent in the order they are added.
    #[must_use]
    pub fn filter(mut self, filter: Filter<M>) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter<M>>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    pub fn page_value(&self) -> Option<u32> {
        self.page
    }

    pub fn filter_list(&self) -> &[Filter<M>] {
        &self.filters
    }

    /// Appends this request's query string to `path`.
    pub fn path_and_query(&self, path: &str) -> String {
        build_path(path, self.limit, self.page, &self.filters)
    }
}

/// Builds the query string: `limit`, then `page`, then each filter in order,
/// joined by `&`. Returns an empty string when there is nothing to send.
pub fn build_query<M: Model>(limit: Option<u32>, page: Option<u32>, filters: &[Filter<M>]) -> String {
    let mut parts = Vec::with_capacity(filters.len() + 2);

    if let Some(limit) = limit {
        parts.push(format!("limit={limit}"));
    }
    if let Some(page) = page {
        parts.push(format!("page={page}"));
    }
    parts.extend(filters.iter().map(|f| f.render_with(escape_component)));

    parts.join("&")
}

/// Appends the query to `path` with `?`, or returns the bare path.
pub fn build_path<M: Model>(path: &str, limit: Option<u32>, page: Option<u32>, filters: &[Filter<M>]) -> String {
    let query = build_query(limit, page, filters);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Percent-encodes a value for use as one path segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, PATH_SEGMENT).into()
}

/// Encodes a resource id as exactly one path segment.
///
/// ## Errors
///
/// Returns [`ClientError::InvalidId`] for ids that URL resolution would
/// collapse into another path: empty, `.` and `..`.
pub fn resource_segment(id: &str) -> Result<Cow<'_, str>, ClientError> {
    if matches!(id, "" | "." | "..") {
        return Err(ClientError::InvalidId(id.to_string()));
    }
    Ok(encode_segment(id))
}

fn escape_component(component: &str) -> Cow<'_, str> {
    utf8_percent_encode(component, QUERY_COMPONENT).into()
}
