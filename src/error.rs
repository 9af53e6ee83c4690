use std::fmt;

/// Fieldless discriminant of a [`DispatchError`], convenient for matching
/// and for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MethodNotRegistered,
    RouteNotRegistered,
    HandlerNotFound,
    PathNotRegistered,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MethodNotRegistered => "method_not_registered",
            ErrorKind::RouteNotRegistered => "route_not_registered",
            ErrorKind::HandlerNotFound => "handler_not_found",
            ErrorKind::PathNotRegistered => "path_not_registered",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed resolution.
///
/// Every variant signals a configuration or programming mistake; none of
/// them is transient, so retrying the same request cannot succeed. Mapping
/// these onto HTTP status codes is left to the host.
///
/// ```rust
/// use brrtdispatch::{DispatchError, ErrorKind, Router};
///
/// let mut router = Router::new();
/// router.route("/items/:id").get("item");
///
/// let err = router.select("/items/1", "POST").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::MethodNotRegistered);
/// assert_eq!(err.to_string(), "method not registered: POST");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No route of any shape was registered for the method.
    MethodNotRegistered {
        /// The requested method
        method: String,
    },
    /// The method is known but no pattern has this many segments.
    RouteNotRegistered {
        /// The requested method
        method: String,
        /// Segment count of the request path
        segments: usize,
    },
    /// Patterns of the right shape exist but none of their literals matched.
    HandlerNotFound {
        /// The requested method
        method: String,
        /// The request path
        path: String,
    },
    /// Static router only: the method is known but the exact path is not.
    PathNotRegistered {
        /// The requested method
        method: String,
        /// The request path
        path: String,
    },
}

impl DispatchError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::MethodNotRegistered { .. } => ErrorKind::MethodNotRegistered,
            DispatchError::RouteNotRegistered { .. } => ErrorKind::RouteNotRegistered,
            DispatchError::HandlerNotFound { .. } => ErrorKind::HandlerNotFound,
            DispatchError::PathNotRegistered { .. } => ErrorKind::PathNotRegistered,
        }
    }

    /// The method of the failed request.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            DispatchError::MethodNotRegistered { method }
            | DispatchError::RouteNotRegistered { method, .. }
            | DispatchError::HandlerNotFound { method, .. }
            | DispatchError::PathNotRegistered { method, .. } => method,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::MethodNotRegistered { method } => {
                write!(f, "method not registered: {method}")
            }
            DispatchError::RouteNotRegistered { method, segments } => {
                write!(
                    f,
                    "route not registered: no {method} route has {segments} segments"
                )
            }
            DispatchError::HandlerNotFound { method, path } => {
                write!(f, "handler not found for {method} {path}")
            }
            DispatchError::PathNotRegistered { method, path } => {
                write!(f, "path not registered for {method}: {path}")
            }
        }
    }
}

impl std::error::Error for DispatchError {}
