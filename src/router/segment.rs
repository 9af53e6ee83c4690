//! Segment classification for paths and route patterns.
//!
//! Both registration and resolution split on `/` without collapsing anything:
//! leading, trailing and doubled separators all produce empty segments, and
//! the resulting segment count is part of the lookup key.
//!
//! ```rust
//! use brrtdispatch::router::segment::{classify, split, Segment};
//!
//! let raw = split("/users/42");
//! assert_eq!(raw.as_slice(), &["", "users", "42"]);
//!
//! let pattern = classify("/users/:id");
//! assert_eq!(pattern.len(), 3);
//! assert!(pattern[2].is_param());
//! assert_eq!(pattern[2].text(), "id");
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Path separator used for both patterns and request paths.
pub const SEPARATOR: char = '/';

/// Prefix marking a named parameter segment in a pattern.
pub const PARAM_SIGIL: char = ':';

/// Raw segments of a request path before heap allocation kicks in.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Borrowed raw segments of a request path.
pub type RawSegments<'p> = SmallVec<[&'p str; MAX_INLINE_SEGMENTS]>;

/// One classified segment of a registered pattern.
///
/// Parameter names are `Arc<str>` so that every match can hand them out
/// to [`PathParams`](crate::params::PathParams) with a refcount bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches a raw segment byte-for-byte.
    Literal(Box<str>),
    /// Matches any single raw segment and binds it to the given name.
    Param(Arc<str>),
}

impl Segment {
    /// Literal text, or the parameter name with the sigil stripped.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Segment::Literal(text) => text,
            Segment::Param(name) => name,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }

    /// Whether this segment accepts the given raw request segment.
    #[inline]
    #[must_use]
    pub fn accepts(&self, raw: &str) -> bool {
        match self {
            Segment::Literal(text) => text.as_ref() == raw,
            Segment::Param(_) => true,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{PARAM_SIGIL}{name}"),
        }
    }
}

/// Split a request path into raw segments.
///
/// `""` yields one empty segment, `"/"` yields two.
#[inline]
#[must_use]
pub fn split(path: &str) -> RawSegments<'_> {
    path.split(SEPARATOR).collect()
}

/// Classify every segment of a route pattern.
///
/// Parameter-name uniqueness is not checked here.
#[must_use]
pub fn classify(pattern: &str) -> Box<[Segment]> {
    pattern
        .split(SEPARATOR)
        .map(|raw| match raw.strip_prefix(PARAM_SIGIL) {
            Some(name) => Segment::Param(Arc::from(name)),
            None => Segment::Literal(Box::from(raw)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_empty_segments() {
        assert_eq!(split("").as_slice(), &[""]);
        assert_eq!(split("/").as_slice(), &["", ""]);
        assert_eq!(split("/a//b/").as_slice(), &["", "a", "", "b", ""]);
        assert_eq!(split("a/b").as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_classify_literal_and_param() {
        let segments = classify("/users/:id/posts");
        assert_eq!(
            segments.as_ref(),
            &[
                Segment::Literal("".into()),
                Segment::Literal("users".into()),
                Segment::Param("id".into()),
                Segment::Literal("posts".into()),
            ]
        );
    }

    #[test]
    fn test_classify_strips_only_one_sigil() {
        let segments = classify("/::x/a:b");
        assert_eq!(segments[1], Segment::Param(":x".into()));
        assert_eq!(segments[2], Segment::Literal("a:b".into()));
    }

    #[test]
    fn test_bare_sigil_is_unnamed_param() {
        let segments = classify("/:");
        assert!(segments[1].is_param());
        assert_eq!(segments[1].text(), "");
    }

    #[test]
    fn test_accepts() {
        let literal = Segment::Literal("new".into());
        assert!(literal.accepts("new"));
        assert!(!literal.accepts("New"));
        assert!(!literal.accepts(""));

        let param = Segment::Param("id".into());
        assert!(param.accepts("42"));
        assert!(param.accepts(""));
    }

    #[test]
    fn test_display_round_trips_pattern_text() {
        let rendered: Vec<String> = classify("/items/:id")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered.join("/"), "/items/:id");
    }
}
