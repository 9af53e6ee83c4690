//! # brrtdispatch
//!
//! **brrtdispatch** is a request-dispatch table for HTTP servers: given a
//! method and a path it selects the single registered handler for the
//! request and extracts the named path parameters of the matched pattern.
//! It performs no I/O and never calls the handlers it stores.
//!
//! ## Overview
//!
//! - **[`router`]** - the dynamic [`Router`] (`/users/:id`) and the exact-match
//!   [`StaticRouter`], both with a fluent per-verb builder
//! - **[`params`]** - path and query parameter access
//! - **[`error`]** - the [`DispatchError`] family returned on no-match
//! - **[`shared`]** - publishing a built table to concurrent resolvers
//! - **[`runtime_config`]** - diagnostics settings from env or TOML
//! - **[`logging`]** - a ready-made `tracing` subscriber stack
//!
//! ## Matching rules
//!
//! Patterns and paths are split on `/` with empty segments preserved, so
//! `/a/b` and `/a/b/` have different segment counts. A `:name` segment
//! matches any single raw segment verbatim. Among patterns with the same
//! method and segment count, the one with a literal at the earliest
//! position where they differ wins.
//!
//! ```rust
//! use brrtdispatch::{ErrorKind, Router};
//!
//! let mut router = Router::new();
//! router.route("/items/:id").get("H1");
//! router.route("/items/count").get("H2");
//!
//! assert_eq!(*router.select("/items/count", "GET").unwrap().handler, "H2");
//! assert_eq!(
//!     router.select("/items/77", "GET").unwrap().params.get("id"),
//!     Some("77")
//! );
//! assert_eq!(
//!     router.select("/items/77", "POST").unwrap_err().kind(),
//!     ErrorKind::MethodNotRegistered
//! );
//! assert_eq!(
//!     router.select("/items/77/extra", "GET").unwrap_err().kind(),
//!     ErrorKind::RouteNotRegistered
//! );
//! ```
//!
//! ## Lifecycle
//!
//! Register everything, then serve. The tables have no internal locking;
//! resolution takes `&self` and is safe to run from any number of threads
//! once registration is done. For runtime registration, publish the table
//! through [`SharedRouter`] or guard it with an external read-write lock.

#![forbid(unsafe_code)]

pub mod error;
pub mod logging;
pub mod params;
pub mod router;
pub mod runtime_config;
pub mod shared;

pub use error::{DispatchError, ErrorKind};
pub use params::{FormUrlEncoded, PathParams, QueryParams, QueryParser, RequestParams};
pub use router::{RequestMatch, RouteBuilder, RouteMatch, RouteTable, Router, StaticRouter};
pub use runtime_config::RouterConfig;
pub use shared::SharedRouter;
