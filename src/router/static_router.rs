//! Exact-path dispatch table.
//!
//! No segment analysis at all: a path is a map key. `/a/b` and `/a/b/` are
//! different routes and neither falls back to the other.

use http::{Method, Uri};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::builder::{RouteBuilder, RouteTable};
use super::method::sort_methods;
use crate::error::DispatchError;

/// Method → exact path → handler.
///
/// ```rust
/// use brrtdispatch::{ErrorKind, StaticRouter};
///
/// let mut router = StaticRouter::new();
/// router.route("/health").get("health").head("health_head");
///
/// assert_eq!(*router.select("/health", "HEAD").unwrap(), "health_head");
/// assert_eq!(
///     router.select("/health/", "GET").unwrap_err().kind(),
///     ErrorKind::PathNotRegistered
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StaticRouter<H> {
    table: HashMap<String, HashMap<String, H>>,
}

impl<H> Default for StaticRouter<H> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<H> StaticRouter<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, path: &str) -> RouteBuilder<'_, Self> {
        RouteBuilder::new(self, path)
    }

    /// Store `handler` under `(method, path)`, replacing any previous one.
    pub fn register(&mut self, path: &str, method: &str, handler: H) {
        let previous = self
            .table
            .entry(method.to_owned())
            .or_default()
            .insert(path.to_owned(), handler);

        if previous.is_some() {
            debug!(method = %method, path = %path, "Static route replaced");
        } else {
            debug!(method = %method, path = %path, "Static route registered");
        }
    }

    /// Exact two-level lookup.
    ///
    /// # Errors
    ///
    /// * [`DispatchError::MethodNotRegistered`] - nothing registered for `method`
    /// * [`DispatchError::PathNotRegistered`] - `path` not registered for `method`
    pub fn select(&self, path: &str, method: &str) -> Result<&H, DispatchError> {
        let result = self
            .table
            .get(method)
            .ok_or_else(|| DispatchError::MethodNotRegistered {
                method: method.to_owned(),
            })
            .and_then(|routes| {
                routes
                    .get(path)
                    .ok_or_else(|| DispatchError::PathNotRegistered {
                        method: method.to_owned(),
                        path: path.to_owned(),
                    })
            });

        match &result {
            Ok(_) => debug!(method = %method, path = %path, "Static route matched"),
            Err(err) => warn!(
                method = %method,
                path = %path,
                error_kind = %err.kind(),
                "No static route matched"
            ),
        }

        result
    }

    /// Resolve from transport types; the query string is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select).
    pub fn select_uri(&self, method: &Method, uri: &Uri) -> Result<&H, DispatchError> {
        self.select(uri.path(), method.as_str())
    }

    /// Every method with an exact registration for `path`.
    #[must_use]
    pub fn allowed(&self, path: &str) -> Vec<String> {
        let mut allowed: Vec<String> = self
            .table
            .iter()
            .filter(|(_, routes)| routes.contains_key(path))
            .map(|(method, _)| method.clone())
            .collect();
        sort_methods(&mut allowed);
        allowed
    }

    /// Number of distinct `(method, path)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.values().all(HashMap::is_empty)
    }
}

impl<H> RouteTable for StaticRouter<H> {
    type Handler = H;

    fn register(&mut self, pattern: &str, method: &str, handler: H) {
        StaticRouter::register(self, pattern, method, handler);
    }
}
