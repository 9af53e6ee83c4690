use http::Method;

/// The nine standard verbs, in the order the builder exposes them.
///
/// Any other string is still a valid method for registration and resolution;
/// methods are compared case-sensitively as plain strings.
pub const STANDARD_METHODS: [Method; 9] = [
    Method::POST,
    Method::GET,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
    Method::CONNECT,
    Method::HEAD,
    Method::TRACE,
];

/// Sort method names: standard verbs first in [`STANDARD_METHODS`] order,
/// then everything else lexicographically.
pub(crate) fn sort_methods(methods: &mut [String]) {
    methods.sort_by(|a, b| {
        let rank = |m: &str| {
            STANDARD_METHODS
                .iter()
                .position(|s| s.as_str() == m)
                .unwrap_or(STANDARD_METHODS.len())
        };
        rank(a.as_str()).cmp(&rank(b.as_str())).then_with(|| a.cmp(b))
    });
}
