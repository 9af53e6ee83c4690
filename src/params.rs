//! # Parameters
//!
//! Read-only access to the two parameter sources of a request:
//!
//! - **Path parameters** bound by the resolver from `:name` segments
//! - **Query parameters** produced by a [`QueryParser`]
//!
//! Both are stored in `SmallVec`s so that requests with up to
//! [`MAX_INLINE_PARAMS`] parameters never touch the heap for the list itself.
//!
//! ```rust
//! use brrtdispatch::params::{FormUrlEncoded, PathParams, QueryParser, RequestParams};
//!
//! let mut path = PathParams::new();
//! path.insert("id".into(), "42".to_string());
//! let query = FormUrlEncoded.parse("limit=10&sort=name");
//!
//! let params = RequestParams::new(path, query);
//! assert_eq!(params.path_value("id"), Some("42"));
//! assert_eq!(params.query_value("limit"), Some("10"));
//! assert_eq!(params.query_value("offset"), None);
//! ```

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Path parameters bound during a single resolution.
///
/// Names are unique: binding a name twice (a pattern such as `/:id/x/:id`)
/// keeps the value from the right-most position.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>,
}

impl PathParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, overwriting an earlier binding of the same name.
    pub fn insert(&mut self, name: Arc<str>, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in pattern order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a `HashMap`. This allocates; prefer [`get`](Self::get) on hot paths.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl fmt::Debug for PathParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Query parameters in the order a parser produced them.
///
/// Lookup uses "last write wins" semantics: for `?limit=10&limit=20`,
/// `get("limit")` returns `"20"`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: SmallVec<[(String, String); MAX_INLINE_PARAMS]>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Turns a raw query string (without the leading `?`) into [`QueryParams`].
///
/// The router never parses queries itself; it hands the raw string to
/// whichever parser the host supplies.
pub trait QueryParser {
    fn parse(&self, raw: &str) -> QueryParams;
}

impl<F> QueryParser for F
where
    F: Fn(&str) -> QueryParams,
{
    fn parse(&self, raw: &str) -> QueryParams {
        self(raw)
    }
}

/// `application/x-www-form-urlencoded` query parser backed by `url`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormUrlEncoded;

impl QueryParser for FormUrlEncoded {
    fn parse(&self, raw: &str) -> QueryParams {
        url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Uniform read-only view over path and query parameters.
///
/// No decoding, validation or type conversion happens here; unknown names
/// yield `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    path: PathParams,
    query: QueryParams,
}

impl RequestParams {
    #[must_use]
    pub fn new(path: PathParams, query: QueryParams) -> Self {
        Self { path, query }
    }

    #[inline]
    #[must_use]
    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.path.get(name)
    }

    #[inline]
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }

    #[must_use]
    pub fn path(&self) -> &PathParams {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    #[must_use]
    pub fn into_parts(self) -> (PathParams, QueryParams) {
        (self.path, self.query)
    }
}
