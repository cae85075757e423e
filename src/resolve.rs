//! Resolution of relative references against a base URI.
//!
//! Follows the case analysis of RFC 2396 section 5.2, stopping at the first
//! case that applies:
//!
//! 1. an empty reference (possibly with a query or fragment) addresses the base
//! 2. a reference with a scheme is absolute
//! 3. a reference with an authority is a network-path reference
//! 4. a reference with an absolute path keeps the base authority
//! 5. otherwise the path is merged with the base directory and normalized
//!
//! Dot segments that would climb above the root are left in place, as in
//! the "abnormal examples" of RFC 2396 appendix C.

use crate::error::MalformedUriError;
use crate::parser::{self, Components};
use crate::uri::Uri;

impl Uri {
    /// Resolves `reference` against this URI.
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` if the reference is malformed, or if it is
    /// relative (other than a bare fragment) and this URI is opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// assert_eq!(base.resolve("g").unwrap().as_str(), "http://a/b/c/g");
    /// assert_eq!(base.resolve("../g").unwrap().as_str(), "http://a/b/g");
    /// assert_eq!(base.resolve("//g").unwrap().as_str(), "http://g");
    /// assert_eq!(base.resolve("?y").unwrap().as_str(), "http://a/b/c/d;p?y");
    /// assert_eq!(base.resolve("#s").unwrap().as_str(), "http://a/b/c/d;p?q#s");
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Self, MalformedUriError> {
        if reference.is_empty() {
            tracing::trace!(base = %self, "empty reference resolves to the base");
            return Ok(self.clone());
        }
        let components = parser::split(reference, Some(self)).inspect_err(|e| {
            tracing::debug!(base = %self, reference, error = %e, "rejected reference");
        })?;
        Self::commit(merge(self, components))
    }
}

/// Combines a parsed reference with its base.
fn merge(base: &Uri, mut reference: Components) -> Components {
    let path = reference.path.take().unwrap_or_default();

    if reference.scheme.is_none() && reference.host.is_none() && path.is_empty() {
        tracing::trace!("resolving same-document reference");
        let mut result = Components::from_uri(base);
        if reference.query.is_some() {
            result.query = reference.query;
        }
        result.fragment = reference.fragment;
        return result;
    }

    if reference.scheme.is_some() {
        tracing::trace!("resolving absolute reference");
        reference.path = Some(path);
        return reference;
    }
    reference.scheme = Some(base.scheme().to_string());

    if reference.host.is_some() {
        tracing::trace!("resolving network-path reference");
        reference.path = Some(path);
        return reference;
    }
    reference.userinfo = base.userinfo().map(str::to_string);
    reference.host = base.host().map(str::to_string);
    reference.port = base.port();

    if path.starts_with('/') {
        tracing::trace!("resolving absolute-path reference");
        reference.path = Some(path);
        return reference;
    }

    tracing::trace!("resolving relative-path reference");
    let mut merged = directory(base.path()).to_string();
    merged.push_str(&path);
    reference.path = Some(remove_dot_segments(merged));
    reference
}

/// Returns the base path up to and including its last `/`, or `/` when it
/// has none.
fn directory(path: Option<&str>) -> &str {
    path.and_then(|p| p.rfind('/').map(|i| &p[..=i]))
        .unwrap_or("/")
}

/// Removes `.` and `<segment>/..` from a merged path.
///
/// A `..` with no complete segment before it other than `..` is kept.
///
/// # Examples
///
/// ```
/// use uriref::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/b/c/./g".to_string()), "/b/c/g");
/// assert_eq!(remove_dot_segments("/b/c/../g".to_string()), "/b/g");
/// assert_eq!(remove_dot_segments("/b/c/..".to_string()), "/b/");
/// assert_eq!(remove_dot_segments("/b/../../g".to_string()), "/../g");
/// ```
#[must_use]
pub fn remove_dot_segments(mut path: String) -> String {
    while let Some(i) = path.find("/./") {
        path.replace_range(i + 1..i + 3, "");
    }
    if path.ends_with("/.") {
        path.pop();
    }

    // The scan restarts at the removed segment so that "a/b/../../" collapses fully.
    let mut from = 0;
    while let Some(i) = path.get(from..).and_then(|rest| rest.find("/../")).map(|i| i + from) {
        match path[..i].rfind('/') {
            Some(start) if &path[start + 1..i] != ".." => {
                path.replace_range(start..i + 3, "");
                from = start;
            }
            _ => from = i + 3,
        }
    }

    if let Some(end) = path.strip_suffix("/..").map(str::len) {
        if let Some(start) = path[..end].rfind('/') {
            if &path[start + 1..end] != ".." {
                path.truncate(start + 1);
            }
        }
    }

    path
}

/// Returns up to three ancestor directories of `path`, closest first.
///
/// The first entry is the directory holding the last segment, each further
/// entry strips one more segment. The list stops before an empty prefix.
pub(crate) fn ancestor_directories(path: Option<&str>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };
    let mut ancestors = Vec::with_capacity(3);
    // A sentinel segment makes a trailing '/' count as a directory of its own.
    let mut current = format!("{path}a");
    for _ in 0..3 {
        let search = &current[..current.len() - 1];
        let parent = search.rfind('/').map_or("", |i| &current[..=i]).to_string();
        if parent.is_empty() {
            break;
        }
        ancestors.push(parent.clone());
        current = parent;
    }
    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(base: &str, reference: &str) -> String {
        Uri::parse(base).unwrap().resolve(reference).unwrap().into_string()
    }

    #[test]
    fn empty_reference_is_the_base() {
        assert_eq!(resolve("http://a/b?q#f", ""), "http://a/b?q#f");
    }

    #[test]
    fn fragment_replaces_base_fragment() {
        assert_eq!(resolve("http://a/b?q#f", "#g"), "http://a/b?q#g");
    }

    #[test]
    fn query_only_reference_drops_base_fragment() {
        assert_eq!(resolve("http://a/b?q#f", "?y"), "http://a/b?y");
    }

    #[test]
    fn absolute_reference_wins() {
        assert_eq!(resolve("http://a/b", "ftp://x/y"), "ftp://x/y");
        assert_eq!(resolve("http://a/b", "urn:x"), "urn:x");
    }

    #[test]
    fn network_path_inherits_scheme_only() {
        assert_eq!(resolve("https://u@a:1/b", "//x/y?z"), "https://x/y?z");
    }

    #[test]
    fn absolute_path_keeps_authority() {
        assert_eq!(resolve("http://u@a:1/b/c", "/x"), "http://u@a:1/x");
    }

    #[test]
    fn merge_against_empty_base_path() {
        assert_eq!(resolve("http://a", "g"), "http://a/g");
        assert_eq!(resolve("http://a?q", "g"), "http://a/g");
    }

    #[test]
    fn same_document_against_pathless_base() {
        let base = Uri::from_parts("http", None, Some("a"), None, None, None, None).unwrap();
        assert_eq!(base.resolve("#f").unwrap().as_str(), "http://a#f");
        assert_eq!(base.resolve("?q").unwrap().as_str(), "http://a?q");
    }

    #[test]
    fn fragment_against_opaque_base() {
        assert_eq!(resolve("urn:x:y", "#z"), "urn:x:y#z");
    }

    #[test]
    fn relative_against_opaque_base_fails() {
        let base = Uri::parse("mailto:joe@example.org").unwrap();
        assert!(matches!(
            base.resolve("g"),
            Err(MalformedUriError::CannotRelativizeOpaqueBase { .. })
        ));
        assert!(matches!(
            base.resolve("?q"),
            Err(MalformedUriError::CannotRelativizeOpaqueBase { .. })
        ));
    }

    #[test]
    fn reference_errors_propagate() {
        let base = Uri::parse("http://a/b").unwrap();
        assert!(matches!(
            base.resolve("g%zz"),
            Err(MalformedUriError::InvalidEscapeSequence { .. })
        ));
        assert!(matches!(
            base.resolve("//a:x/"),
            Err(MalformedUriError::InvalidPort { .. })
        ));
    }

    #[test]
    fn dot_segments() {
        assert_eq!(remove_dot_segments("/a/./b/./c".to_string()), "/a/b/c");
        assert_eq!(remove_dot_segments("/a/././b".to_string()), "/a/b");
        assert_eq!(remove_dot_segments("/a/b/.".to_string()), "/a/b/");
        assert_eq!(remove_dot_segments("/a/b/../../c".to_string()), "/c");
        assert_eq!(remove_dot_segments("/a/../../c".to_string()), "/../c");
        assert_eq!(remove_dot_segments("/../a/../b".to_string()), "/../b");
        assert_eq!(remove_dot_segments("/a/../..".to_string()), "/..");
        assert_eq!(remove_dot_segments("/a/b/../..".to_string()), "/");
        assert_eq!(remove_dot_segments("/a/g..".to_string()), "/a/g..");
        assert_eq!(remove_dot_segments("/a/..g".to_string()), "/a/..g");
    }

    #[test]
    fn dot_segments_after_climbing_above_root() {
        assert_eq!(remove_dot_segments("/a/../../b/../c".to_string()), "/../c");
        assert_eq!(remove_dot_segments("/../b/../c".to_string()), "/../c");
        assert_eq!(remove_dot_segments("/../../b/c/../d".to_string()), "/../../b/d");
        assert_eq!(resolve("http://a/a/x", "../../b/../c"), "http://a/../c");
    }

    #[test]
    fn dot_segment_removal_is_idempotent() {
        for path in ["/a/../../b/../c", "/b/c/../../../g", "/a/./../b/..", "/x/../../y/./z/.."] {
            let once = remove_dot_segments(path.to_string());
            assert_eq!(remove_dot_segments(once.clone()), once, "path {path:?}");
        }
    }

    #[test]
    fn ancestors_of_path() {
        assert_eq!(
            ancestor_directories(Some("/b/c/d;p")),
            vec!["/b/c/", "/b/", "/"]
        );
        assert_eq!(ancestor_directories(Some("/b/c/")), vec!["/b/c/", "/b/", "/"]);
        assert_eq!(ancestor_directories(Some("/b/d")), vec!["/b/", "/"]);
        assert_eq!(ancestor_directories(Some("/d")), vec!["/"]);
        assert!(ancestor_directories(Some("")).is_empty());
        assert!(ancestor_directories(None).is_empty());
    }
}
