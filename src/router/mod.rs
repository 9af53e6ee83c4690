//! # Router Module
//!
//! Route registration and resolution for two kinds of dispatch table:
//!
//! - [`Router`] - patterns with `:name` parameter segments
//! - [`StaticRouter`] - exact path strings, no parameters
//!
//! ## Architecture
//!
//! Registration runs once per route, usually at startup:
//!
//! 1. **Classification**: the pattern is split on `/` into literal and
//!    parameter segments ([`segment`]).
//! 2. **Indexing**: the pattern goes into the bucket for its method and
//!    segment count.
//! 3. **Ordering**: the bucket is re-sorted by specificity ([`specificity`])
//!    so literals are tried before parameters at the earliest differing
//!    position.
//!
//! Resolution runs once per request and is the hot path:
//!
//! 1. Split the request path the same way (empty segments kept).
//! 2. Pick the method bucket, then the segment-count bucket.
//! 3. Scan the bucket in order and return the first pattern whose literals
//!    all match, with its parameters bound.
//!
//! ## Example
//!
//! ```rust
//! use brrtdispatch::router::Router;
//!
//! let mut router = Router::new();
//! router.route("/users/:id").get("get_user");
//! router.route("/users/new").get("new_user_form");
//!
//! // literal beats parameter regardless of registration order
//! let m = router.select("/users/new", "GET").unwrap();
//! assert_eq!(*m.handler, "new_user_form");
//! assert!(m.params.is_empty());
//!
//! let m = router.select("/users/42", "GET").unwrap();
//! assert_eq!(m.params.get("id"), Some("42"));
//! ```
//!
//! ## Performance
//!
//! - Bucket selection: two hash lookups, independent of the number of routes
//! - Scan: linear in bucket size, no allocation until a pattern matches
//! - Path parameters: stack-allocated for up to
//!   [`MAX_INLINE_PARAMS`](crate::params::MAX_INLINE_PARAMS) parameters

mod builder;
mod core;
mod method;
pub mod segment;
pub mod specificity;
mod static_router;

pub use builder::{RouteBuilder, RouteTable};
pub use self::core::{RequestMatch, RouteMatch, RoutePattern, Router};
pub use method::STANDARD_METHODS;
pub use static_router::StaticRouter;
