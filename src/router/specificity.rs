//! Specificity ordering within a bucket.
//!
//! A bucket holds every pattern registered under one method with one segment
//! count. Patterns are ordered so that, scanning positions left to right, the
//! first position where one pattern has a literal and the other a parameter
//! decides precedence: the literal wins. `/users/new` therefore sorts before
//! `/users/:id`, and `/a/:x/c` sorts before `/:y/b/c`.
//!
//! The order is a total preorder. Patterns with the same classification at
//! every position compare `Equal` and keep their registration order, because
//! [`sort_bucket`] uses a stable sort.

use std::cmp::Ordering;

use super::core::RoutePattern;
use super::segment::Segment;

/// Compare two classified patterns by specificity.
///
/// `Less` means `a` is more specific and must be tried first. When every
/// position of the shorter pattern ties, the shorter one sorts first; bucket
/// membership normally rules that case out.
#[must_use]
pub fn compare(a: &[Segment], b: &[Segment]) -> Ordering {
    for (left, right) in a.iter().zip(b) {
        match (left.is_param(), right.is_param()) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            _ => {}
        }
    }
    a.len().cmp(&b.len())
}

/// Re-establish specificity order after an insertion.
pub fn sort_bucket<H>(bucket: &mut [RoutePattern<H>]) {
    bucket.sort_by(|a, b| compare(a.segments(), b.segments()));
}

/// Whether `existing` makes `candidate` unreachable.
///
/// True when both have the same length, the same classification at every
/// position, and equal text at every literal position. Parameter names are
/// irrelevant: `/a/:x` shadows `/a/:y`.
#[must_use]
pub fn shadows(existing: &[Segment], candidate: &[Segment]) -> bool {
    existing.len() == candidate.len()
        && existing
            .iter()
            .zip(candidate)
            .all(|(left, right)| match (left, right) {
                (Segment::Literal(l), Segment::Literal(r)) => l == r,
                (Segment::Param(_), Segment::Param(_)) => true,
                _ => false,
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::segment::classify;

    fn cmp(a: &str, b: &str) -> Ordering {
        compare(&classify(a), &classify(b))
    }

    #[test]
    fn test_literal_beats_param_at_first_difference() {
        assert_eq!(cmp("/users/new", "/users/:id"), Ordering::Less);
        assert_eq!(cmp("/users/:id", "/users/new"), Ordering::Greater);
    }

    #[test]
    fn test_earliest_difference_decides() {
        // literal at position 1 outweighs two literals further right
        assert_eq!(cmp("/a/:x/:y", "/:a/b/c"), Ordering::Less);
        assert_eq!(cmp("/:a/b/c", "/a/:x/:y"), Ordering::Greater);
    }

    #[test]
    fn test_same_classification_ties() {
        assert_eq!(cmp("/a/:x", "/b/:y"), Ordering::Equal);
        assert_eq!(cmp("/a/b", "/a/b"), Ordering::Equal);
        assert_eq!(cmp("/:x/:y", "/:p/:q"), Ordering::Equal);
    }

    #[test]
    fn test_shorter_pattern_breaks_full_tie() {
        assert_eq!(cmp("/a", "/a/b"), Ordering::Less);
        assert_eq!(cmp("/a/:b", "/a"), Ordering::Greater);
    }

    #[test]
    fn test_sort_bucket_is_stable_for_ties() {
        let mut bucket = vec![
            RoutePattern::new("/:x/b", "first-param"),
            RoutePattern::new("/a/:y", "literal"),
            RoutePattern::new("/:z/c", "second-param"),
        ];
        sort_bucket(&mut bucket);
        let order: Vec<&str> = bucket.iter().map(|p| *p.handler()).collect();
        assert_eq!(order, vec!["literal", "first-param", "second-param"]);
    }

    #[test]
    fn test_shadows() {
        assert!(shadows(&classify("/a/:x"), &classify("/a/:y")));
        assert!(shadows(&classify("/a/b"), &classify("/a/b")));
        assert!(!shadows(&classify("/a/:x"), &classify("/b/:x")));
        assert!(!shadows(&classify("/a/b"), &classify("/a/:b")));
        assert!(!shadows(&classify("/a"), &classify("/a/")));
    }
}
