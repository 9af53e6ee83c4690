//! Fluent per-verb registration.
//!
//! [`RouteBuilder`] borrows the table mutably and forwards every verb call to
//! [`RouteTable::register`], so one pattern can collect several verbs:
//!
//! ```rust
//! use brrtdispatch::Router;
//!
//! let mut router = Router::new();
//! router
//!     .route("/pets/:id")
//!     .get("get_pet")
//!     .put("update_pet")
//!     .delete("delete_pet");
//!
//! assert_eq!(*router.select("/pets/7", "PUT").unwrap().handler, "update_pet");
//! ```

use http::Method;

/// A table that accepts `(pattern, method, handler)` registrations.
pub trait RouteTable {
    type Handler;

    /// Store `handler` for `method` requests matching `pattern`. Never fails.
    fn register(&mut self, pattern: &str, method: &str, handler: Self::Handler);
}

/// Registration chain for a single pattern.
pub struct RouteBuilder<'t, T: RouteTable + ?Sized> {
    table: &'t mut T,
    pattern: String,
}

impl<'t, T: RouteTable + ?Sized> RouteBuilder<'t, T> {
    pub(crate) fn new(table: &'t mut T, pattern: &str) -> Self {
        Self {
            table,
            pattern: pattern.to_owned(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Register under an arbitrary method name (e.g. `PURGE`).
    pub fn method(self, method: &str, handler: T::Handler) -> Self {
        self.table.register(&self.pattern, method, handler);
        self
    }

    fn verb(self, method: Method, handler: T::Handler) -> Self {
        self.method(method.as_str(), handler)
    }

    pub fn post(self, handler: T::Handler) -> Self {
        self.verb(Method::POST, handler)
    }

    pub fn get(self, handler: T::Handler) -> Self {
        self.verb(Method::GET, handler)
    }

    pub fn put(self, handler: T::Handler) -> Self {
        self.verb(Method::PUT, handler)
    }

    pub fn patch(self, handler: T::Handler) -> Self {
        self.verb(Method::PATCH, handler)
    }

    pub fn delete(self, handler: T::Handler) -> Self {
        self.verb(Method::DELETE, handler)
    }

    pub fn options(self, handler: T::Handler) -> Self {
        self.verb(Method::OPTIONS, handler)
    }

    pub fn connect(self, handler: T::Handler) -> Self {
        self.verb(Method::CONNECT, handler)
    }

    pub fn head(self, handler: T::Handler) -> Self {
        self.verb(Method::HEAD, handler)
    }

    pub fn trace(self, handler: T::Handler) -> Self {
        self.verb(Method::TRACE, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(String, String, u8)>);

    impl RouteTable for Recorder {
        type Handler = u8;

        fn register(&mut self, pattern: &str, method: &str, handler: u8) {
            self.0.push((pattern.to_owned(), method.to_owned(), handler));
        }
    }

    #[test]
    fn test_every_verb_forwards_to_register() {
        let mut table = Recorder::default();
        RouteBuilder::new(&mut table, "/x")
            .post(0)
            .get(1)
            .put(2)
            .patch(3)
            .delete(4)
            .options(5)
            .connect(6)
            .head(7)
            .trace(8)
            .method("PURGE", 9);

        let methods: Vec<&str> = table.0.iter().map(|(_, m, _)| m.as_str()).collect();
        assert_eq!(
            methods,
            vec![
                "POST", "GET", "PUT", "PATCH", "DELETE", "OPTIONS", "CONNECT", "HEAD", "TRACE",
                "PURGE"
            ]
        );
        assert!(table.0.iter().all(|(p, _, _)| p == "/x"));
        assert!(table.0.iter().map(|(_, _, h)| *h).eq(0..=9));
    }
}
