//! # Shared Router
//!
//! Publishing a built [`Router`] to concurrent resolvers.
//!
//! The router itself has no internal locking: build it on one thread, then
//! hand it to a [`SharedRouter`]. Resolvers load the current table through an
//! `ArcSwap`, so reads never block and never observe a half-registered table.
//! Runtime registration goes through [`SharedRouter::modify`], which copies
//! the table, applies the change, and swaps the copy in.
//!
//! ```rust
//! use brrtdispatch::{Router, SharedRouter};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let mut router = Router::new();
//! router.route("/users/:id").get("get_user");
//! let shared = Arc::new(SharedRouter::new(router));
//!
//! let reader = Arc::clone(&shared);
//! let handle = thread::spawn(move || reader.select("/users/7", "GET").map(|(h, _)| h));
//! assert_eq!(handle.join().unwrap(), Ok("get_user"));
//!
//! shared.modify(|router| {
//!     router.route("/users/new").get("new_user_form");
//! });
//! assert_eq!(shared.select("/users/new", "GET").unwrap().0, "new_user_form");
//! ```

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use crate::error::DispatchError;
use crate::params::PathParams;
use crate::router::Router;

/// Atomically replaceable handle to a published routing table.
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
}

impl<H> SharedRouter<H> {
    /// Publish `router` as the initial table.
    pub fn new(router: Router<H>) -> Self {
        log_published(&router);
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Snapshot of the currently published table.
    ///
    /// The snapshot stays valid, and unchanged, even if a newer table is
    /// published while it is held.
    #[must_use]
    pub fn load(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Replace the whole table.
    pub fn publish(&self, router: Router<H>) {
        log_published(&router);
        self.current.store(Arc::new(router));
    }
}

impl<H: Clone> SharedRouter<H> {
    /// Apply registrations to a copy of the current table and publish it.
    ///
    /// If another `modify` or `publish` lands in between, `apply` runs again
    /// on the newer table, so it may be called more than once.
    pub fn modify<F>(&self, apply: F)
    where
        F: Fn(&mut Router<H>),
    {
        let mut published = None;
        self.current.rcu(|current| {
            let mut next = Router::clone(current);
            apply(&mut next);
            let next = Arc::new(next);
            published = Some(Arc::clone(&next));
            next
        });
        // the last run is the one that was stored
        if let Some(router) = &published {
            log_published(router);
        }
    }

    /// Resolve against the current table, cloning the handler out of it.
    ///
    /// # Errors
    ///
    /// Same as [`Router::select`].
    pub fn select(&self, path: &str, method: &str) -> Result<(H, PathParams), DispatchError> {
        self.current
            .load()
            .select(path, method)
            .map(|route_match| (route_match.handler.clone(), route_match.params))
    }
}

fn log_published<H>(router: &Router<H>) {
    let routes_summary: Vec<String> = router
        .routes()
        .into_iter()
        .take(10)
        .map(|(method, pattern)| format!("{method} {pattern}"))
        .collect();

    info!(
        routes_count = router.len(),
        routes_summary = ?routes_summary,
        "Routing table published"
    );
}
