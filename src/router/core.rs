//! Router core module - registration and the resolution hot path.
//!
//! The table is indexed twice before any string comparison happens:
//! method first, then the segment count of the path. Only the patterns in
//! that bucket are scanned, in specificity order, and the first one whose
//! literals all match wins.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::{Method, Uri};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::builder::{RouteBuilder, RouteTable};
use super::method::sort_methods;
use super::segment::{classify, split, Segment};
use super::specificity::{shadows, sort_bucket};
use crate::error::DispatchError;
use crate::params::{FormUrlEncoded, PathParams, QueryParams, QueryParser, RequestParams};
use crate::runtime_config::RouterConfig;

/// A registered pattern together with its handler.
///
/// The segment list is fixed at construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RoutePattern<H> {
    pattern: Arc<str>,
    segments: Box<[Segment]>,
    handler: H,
}

impl<H> RoutePattern<H> {
    #[must_use]
    pub fn new(pattern: &str, handler: H) -> Self {
        Self {
            pattern: Arc::from(pattern),
            segments: classify(pattern),
            handler,
        }
    }

    /// The pattern as registered, e.g. `/users/:id`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Structural match of every position, without allocating.
    #[inline]
    fn matches(&self, raw: &[&str]) -> bool {
        self.segments.len() == raw.len()
            && self
                .segments
                .iter()
                .zip(raw)
                .all(|(segment, value)| segment.accepts(value))
    }

    /// Bind parameter names to the raw values at their positions.
    fn bind(&self, raw: &[&str]) -> PathParams {
        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(raw) {
            if let Segment::Param(name) = segment {
                params.insert(Arc::clone(name), (*value).to_owned());
            }
        }
        params
    }
}

/// Result of successfully resolving a path.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r, H> {
    /// The handler registered for the winning pattern
    pub handler: &'r H,
    /// The winning pattern as registered
    pub pattern: &'r str,
    /// Parameters bound from the path (e.g., `:id` → `{"id": "123"}`)
    pub params: PathParams,
}

/// Result of resolving a request target that may carry a query string.
#[derive(Debug, Clone)]
pub struct RequestMatch<'r, H> {
    /// The handler registered for the winning pattern
    pub handler: &'r H,
    /// The winning pattern as registered
    pub pattern: &'r str,
    /// Path and query parameters behind one accessor
    pub params: RequestParams,
}

/// Segment count → patterns, kept in specificity order.
type Buckets<H> = HashMap<usize, Vec<RoutePattern<H>>>;

/// Dynamic dispatch table for patterns with `:name` parameter segments.
///
/// `H` is whatever the host wants to get back for a request: a function
/// pointer, a boxed closure, an index into its own handler list. The router
/// stores it and hands out references; it never calls or inspects it.
///
/// Build the table first, then share it read-only; see
/// [`SharedRouter`](crate::shared::SharedRouter) for publishing it to
/// concurrent resolvers.
///
/// ```rust
/// use brrtdispatch::{DispatchError, Router};
///
/// let mut router = Router::new();
/// router.route("/items/:id").get("item");
/// router.route("/items/count").get("count");
///
/// let hit = router.select("/items/77", "GET").unwrap();
/// assert_eq!(*hit.handler, "item");
/// assert_eq!(hit.params.get("id"), Some("77"));
///
/// assert_eq!(*router.select("/items/count", "GET").unwrap().handler, "count");
/// assert!(matches!(
///     router.select("/items/77/extra", "GET"),
///     Err(DispatchError::RouteNotRegistered { segments: 4, .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Router<H> {
    /// Method → segment count → ordered bucket
    table: HashMap<String, Buckets<H>>,
    config: RouterConfig,
    len: usize,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::with_config(RouterConfig::default())
    }
}

impl<H> Router<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            table: HashMap::new(),
            config,
            len: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Start a registration chain for `pattern`.
    pub fn route(&mut self, pattern: &str) -> RouteBuilder<'_, Self> {
        RouteBuilder::new(self, pattern)
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// Accepts any string, including empty segments and duplicates. The
    /// bucket is re-sorted after the insertion; among patterns that tie on
    /// specificity the earlier registration is scanned first.
    pub fn register(&mut self, pattern: &str, method: &str, handler: H) {
        let route = RoutePattern::new(pattern, handler);
        let segments = route.segments.len();
        let warn_on_shadowed = self.config.warn_on_shadowed;

        let bucket = self
            .table
            .entry(method.to_owned())
            .or_default()
            .entry(segments)
            .or_default();

        if warn_on_shadowed {
            if let Some(existing) = bucket
                .iter()
                .find(|existing| shadows(existing.segments(), route.segments()))
            {
                warn!(
                    method = %method,
                    pattern = %pattern,
                    shadowed_by = %existing.pattern(),
                    "Route shadowed by an earlier registration"
                );
            }
        }

        bucket.push(route);
        sort_bucket(bucket);
        let bucket_len = bucket.len();
        self.len += 1;

        debug!(
            method = %method,
            pattern = %pattern,
            segments,
            bucket_len,
            "Route registered"
        );
    }

    /// Resolve `path` under `method`.
    ///
    /// `path` must not contain a query string; use
    /// [`select_with_query`](Self::select_with_query) for raw request targets.
    ///
    /// # Errors
    ///
    /// * [`DispatchError::MethodNotRegistered`] - nothing registered for `method`
    /// * [`DispatchError::RouteNotRegistered`] - no pattern with this segment count
    /// * [`DispatchError::HandlerNotFound`] - no pattern's literals matched
    pub fn select(&self, path: &str, method: &str) -> Result<RouteMatch<'_, H>, DispatchError> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let result = self.resolve(path, method);
        let match_duration = match_start.elapsed();

        match &result {
            Ok(route_match) if match_duration > self.config.slow_match_threshold() => {
                warn!(
                    method = %method,
                    path = %path,
                    route_pattern = %route_match.pattern,
                    path_params = ?route_match.params,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            }
            Ok(route_match) => {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route_match.pattern,
                    path_params = ?route_match.params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            Err(err) => {
                warn!(
                    method = %method,
                    path = %path,
                    error_kind = %err.kind(),
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }

    fn resolve(&self, path: &str, method: &str) -> Result<RouteMatch<'_, H>, DispatchError> {
        let raw = split(path);

        let buckets = self
            .table
            .get(method)
            .ok_or_else(|| DispatchError::MethodNotRegistered {
                method: method.to_owned(),
            })?;

        let bucket = buckets
            .get(&raw.len())
            .ok_or_else(|| DispatchError::RouteNotRegistered {
                method: method.to_owned(),
                segments: raw.len(),
            })?;

        bucket
            .iter()
            .find(|route| route.matches(&raw))
            .map(|route| RouteMatch {
                handler: &route.handler,
                pattern: &route.pattern,
                params: route.bind(&raw),
            })
            .ok_or_else(|| DispatchError::HandlerNotFound {
                method: method.to_owned(),
                path: path.to_owned(),
            })
    }

    /// Resolve a request target such as `/users/42?expand=posts`.
    ///
    /// The path part (before the first `?`) is resolved as in
    /// [`select`](Self::select); the query part is parsed as
    /// `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select).
    pub fn select_with_query(
        &self,
        target: &str,
        method: &str,
    ) -> Result<RequestMatch<'_, H>, DispatchError> {
        self.select_with_parser(target, method, &FormUrlEncoded)
    }

    /// Like [`select_with_query`](Self::select_with_query) with a
    /// caller-supplied query parser.
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select).
    pub fn select_with_parser<P: QueryParser + ?Sized>(
        &self,
        target: &str,
        method: &str,
        parser: &P,
    ) -> Result<RequestMatch<'_, H>, DispatchError> {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let route_match = self.select(path, method)?;
        Ok(with_query(route_match, query, parser))
    }

    /// Resolve straight from transport types.
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select).
    pub fn select_uri(
        &self,
        method: &Method,
        uri: &Uri,
    ) -> Result<RequestMatch<'_, H>, DispatchError> {
        let route_match = self.select(uri.path(), method.as_str())?;
        Ok(with_query(
            route_match,
            uri.query().unwrap_or_default(),
            &FormUrlEncoded,
        ))
    }

    /// Every method under which `path` would resolve.
    ///
    /// Standard verbs come first in builder order, custom methods after.
    /// An empty result with a non-empty table lets a host answer 404, a
    /// non-empty one lets it answer 405 with an `Allow` header.
    #[must_use]
    pub fn allowed(&self, path: &str) -> Vec<String> {
        let raw = split(path);
        let mut allowed: Vec<String> = self
            .table
            .iter()
            .filter(|(_, buckets)| {
                buckets
                    .get(&raw.len())
                    .is_some_and(|bucket| bucket.iter().any(|route| route.matches(&raw)))
            })
            .map(|(method, _)| method.clone())
            .collect();
        sort_methods(&mut allowed);
        allowed
    }

    /// Number of registrations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(method, pattern)` pairs: methods in [`allowed`](Self::allowed)
    /// order, then by segment count, then in scan order within each bucket.
    #[must_use]
    pub fn routes(&self) -> Vec<(&str, &str)> {
        let mut methods: Vec<String> = self.table.keys().cloned().collect();
        sort_methods(&mut methods);

        let mut routes = Vec::with_capacity(self.len);
        for method in &methods {
            let Some((method, buckets)) = self.table.get_key_value(method) else {
                continue;
            };
            let mut counts: Vec<&usize> = buckets.keys().collect();
            counts.sort_unstable();
            for count in counts {
                for route in buckets.get(count).into_iter().flatten() {
                    routes.push((method.as_str(), route.pattern()));
                }
            }
        }
        routes
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.len);
        for (method, pattern) in self.routes() {
            println!("[route] {method} {pattern}");
        }
    }
}

impl<H> RouteTable for Router<H> {
    type Handler = H;

    fn register(&mut self, pattern: &str, method: &str, handler: H) {
        Router::register(self, pattern, method, handler);
    }
}

fn with_query<'r, H, P: QueryParser + ?Sized>(
    route_match: RouteMatch<'r, H>,
    query: &str,
    parser: &P,
) -> RequestMatch<'r, H> {
    let query = if query.is_empty() {
        QueryParams::new()
    } else {
        parser.parse(query)
    };
    RequestMatch {
        handler: route_match.handler,
        pattern: route_match.pattern,
        params: RequestParams::new(route_match.params, query),
    }
}
