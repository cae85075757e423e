//! Computing the shortest reference that resolves back to a target URI.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::error::MalformedUriError;
use crate::uri::Uri;

/// The reference forms [`Uri::relativize`] may produce.
///
/// Forms combine with `|`:
///
/// ```
/// use uriref::FormMask;
///
/// let flags = FormMask::SAME_DOCUMENT | FormMask::RELATIVE | FormMask::PARENT;
/// assert!(flags.contains(FormMask::RELATIVE));
/// assert!(!flags.contains(FormMask::GRANDPARENT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormMask(u8);

impl FormMask {
    /// A bare fragment (`#frag`), or the empty reference.
    pub const SAME_DOCUMENT: Self = Self(1);
    /// A network-path reference (`//host/path`).
    pub const NETWORK: Self = Self(2);
    /// An absolute-path reference (`/path`).
    pub const ABSOLUTE: Self = Self(4);
    /// A relative path within the base directory (`g`, `.`).
    pub const RELATIVE: Self = Self(8);
    /// A relative path climbing one directory (`../g`, `..`).
    pub const PARENT: Self = Self(16);
    /// A relative path climbing two directories (`../../g`, `../..`).
    pub const GRANDPARENT: Self = Self(32);

    /// No forms; relativization returns the target unchanged.
    pub const NONE: Self = Self(0);
    /// Every form.
    pub const ALL: Self = Self(63);

    /// Creates a mask from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every form of `other` is in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any form of `other` is in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if no form is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FormMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FormMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for FormMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FormMask, &str); 6] = [
            (FormMask::SAME_DOCUMENT, "SAME_DOCUMENT"),
            (FormMask::NETWORK, "NETWORK"),
            (FormMask::ABSOLUTE, "ABSOLUTE"),
            (FormMask::RELATIVE, "RELATIVE"),
            (FormMask::PARENT, "PARENT"),
            (FormMask::GRANDPARENT, "GRANDPARENT"),
        ];
        let mut names = NAMES
            .iter()
            .filter(|(form, _)| self.contains(*form))
            .map(|(_, name)| *name);
        match names.next() {
            None => f.write_str("NONE"),
            Some(first) => {
                f.write_str(first)?;
                names.try_for_each(|name| write!(f, " | {name}"))
            }
        }
    }
}

/// One directory level a relative path may reach.
struct Climb {
    /// Form that permits this level
    form: FormMask,
    /// Forms at this level or further up; none set ends the search
    reach: FormMask,
    /// Reference to the directory itself
    exact: &'static str,
    /// Prefix to prepend to the rest of the path
    prefix: &'static str,
}

const CLIMBS: [Climb; 3] = [
    Climb {
        form: FormMask::RELATIVE,
        reach: FormMask(FormMask::RELATIVE.0 | FormMask::PARENT.0 | FormMask::GRANDPARENT.0),
        exact: ".",
        prefix: "",
    },
    Climb {
        form: FormMask::PARENT,
        reach: FormMask(FormMask::PARENT.0 | FormMask::GRANDPARENT.0),
        exact: "..",
        prefix: "../",
    },
    Climb {
        form: FormMask::GRANDPARENT,
        reach: FormMask::GRANDPARENT,
        exact: "../..",
        prefix: "../../",
    },
];

impl Uri {
    /// Returns the shortest reference allowed by `flags` that resolves
    /// against this URI to `target`.
    ///
    /// Forms are tried in order: same-document, a relative path climbing
    /// zero, one or two directories, an absolute path, a network path.
    /// An absolute-path reference needs the same authority, a network-path
    /// reference the same scheme. When no form applies, or either URI is
    /// opaque, `target` is returned unchanged. An opaque base has no
    /// authority to share, so even `NETWORK` with a matching scheme gives
    /// back the full target.
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` if `target` is not a valid absolute URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{FormMask, Uri};
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// assert_eq!(base.relativize("http://a/b/c/g", FormMask::ALL).unwrap(), "g");
    /// assert_eq!(base.relativize("http://a/b/g", FormMask::ALL).unwrap(), "../g");
    /// assert_eq!(base.relativize("http://a/b/c/d;p?q#s", FormMask::ALL).unwrap(), "#s");
    /// assert_eq!(base.relativize("http://a/b/g", FormMask::RELATIVE).unwrap(), "http://a/b/g");
    /// ```
    pub fn relativize(&self, target: &str, flags: FormMask) -> Result<String, MalformedUriError> {
        let uri = Self::parse(target)?;
        if !uri.is_hierarchical() || !self.is_hierarchical() {
            return Ok(target.to_string());
        }

        let same_scheme = uri.scheme() == self.scheme();
        let same_authority = same_scheme
            && uri.host() == self.host()
            && uri.userinfo() == self.userinfo()
            && uri.port() == self.port();
        let same_resource =
            same_authority && uri.path() == self.path() && uri.query() == self.query();

        let mut tail = String::new();
        if let Some(query) = uri.query() {
            tail.push('?');
            tail.push_str(query);
        }
        if let Some(fragment) = uri.fragment() {
            tail.push('#');
            tail.push_str(fragment);
        }

        if same_resource && flags.contains(FormMask::SAME_DOCUMENT) {
            tracing::trace!(uri = target, "same-document reference");
            return Ok(uri.fragment().map(|f| format!("#{f}")).unwrap_or_default());
        }

        let path = uri.path().unwrap_or_default();
        if same_authority {
            if let Some(reference) = self.climb(path, &tail, flags) {
                tracing::trace!(uri = target, reference = %reference, "relative-path reference");
                return Ok(reference);
            }
            if flags.contains(FormMask::ABSOLUTE) && path.starts_with('/') && !path.starts_with("//") {
                tracing::trace!(uri = target, "absolute-path reference");
                return Ok(format!("{path}{tail}"));
            }
        }

        if same_scheme && flags.contains(FormMask::NETWORK) {
            tracing::trace!(uri = target, "network-path reference");
            let mut reference = String::from("//");
            if let Some(userinfo) = uri.userinfo() {
                reference.push_str(userinfo);
                reference.push('@');
            }
            reference.push_str(uri.host().unwrap_or_default());
            if let Some(port) = uri.port() {
                reference.push(':');
                reference.push_str(&port.to_string());
            }
            reference.push_str(path);
            reference.push_str(&tail);
            return Ok(reference);
        }

        Ok(target.to_string())
    }

    /// Finds the closest permitted ancestor directory of this URI that
    /// contains `path`, and writes the reference climbing to it.
    fn climb(&self, path: &str, tail: &str, flags: FormMask) -> Option<String> {
        for (climb, directory) in CLIMBS.iter().zip(self.ancestors()) {
            if !flags.intersects(climb.reach) {
                break;
            }
            if !flags.contains(climb.form) {
                continue;
            }
            let Some(rest) = path.strip_prefix(directory.as_str()) else {
                continue;
            };
            return Some(if rest.is_empty() {
                format!("{}{tail}", climb.exact)
            } else if climb.prefix.is_empty() && needs_dot_prefix(rest) {
                format!("./{rest}{tail}")
            } else {
                format!("{}{rest}{tail}", climb.prefix)
            });
        }
        None
    }
}

/// A path-relative reference must not start with `/` or have a colon in
/// its first segment, or it would read back as another reference form.
fn needs_dot_prefix(rest: &str) -> bool {
    rest.starts_with('/') || rest.split('/').next().is_some_and(|first| first.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Uri {
        Uri::parse("http://a/b/c/d;p?q").unwrap()
    }

    #[test]
    fn opaque_target_is_unchanged() {
        assert_eq!(
            base().relativize("mailto:joe@example.org", FormMask::ALL).unwrap(),
            "mailto:joe@example.org"
        );
    }

    #[test]
    fn relative_target_is_rejected() {
        assert!(matches!(
            base().relativize("g", FormMask::ALL),
            Err(MalformedUriError::NoSchemeFound { .. })
        ));
    }

    #[test]
    fn same_document() {
        let base = base();
        assert_eq!(base.relativize("http://a/b/c/d;p?q", FormMask::ALL).unwrap(), "");
        assert_eq!(base.relativize("http://a/b/c/d;p?q#s", FormMask::ALL).unwrap(), "#s");
        assert_eq!(base.relativize("http://a/b/c/d;p?q#", FormMask::ALL).unwrap(), "#");
    }

    #[test]
    fn same_document_needs_its_flag() {
        assert_eq!(
            base().relativize("http://a/b/c/d;p?q#s", FormMask::RELATIVE).unwrap(),
            "d;p?q#s"
        );
    }

    #[test]
    fn exact_directories() {
        let base = base();
        assert_eq!(base.relativize("http://a/b/c/", FormMask::ALL).unwrap(), ".");
        assert_eq!(base.relativize("http://a/b/", FormMask::ALL).unwrap(), "..");
        assert_eq!(base.relativize("http://a/", FormMask::ALL).unwrap(), "../..");
        assert_eq!(base.relativize("http://a/b/c/?x", FormMask::ALL).unwrap(), ".?x");
    }

    #[test]
    fn query_and_fragment_are_kept() {
        assert_eq!(
            base().relativize("http://a/b/g?y#s", FormMask::ALL).unwrap(),
            "../g?y#s"
        );
    }

    #[test]
    fn absolute_path_form() {
        assert_eq!(
            base().relativize("http://a/x/y", FormMask::ABSOLUTE).unwrap(),
            "/x/y"
        );
    }

    #[test]
    fn absolute_path_needs_same_authority() {
        assert_eq!(
            base().relativize("http://b/x", FormMask::ABSOLUTE).unwrap(),
            "http://b/x"
        );
        assert_eq!(
            base().relativize("http://a:81/x", FormMask::ABSOLUTE).unwrap(),
            "http://a:81/x"
        );
    }

    #[test]
    fn network_path_form() {
        assert_eq!(
            base().relativize("http://u@b:8/x?y", FormMask::NETWORK).unwrap(),
            "//u@b:8/x?y"
        );
        assert_eq!(
            base().relativize("ftp://b/x", FormMask::NETWORK).unwrap(),
            "ftp://b/x"
        );
    }

    #[test]
    fn no_forms_returns_target() {
        assert_eq!(
            base().relativize("http://a/b/c/g", FormMask::NONE).unwrap(),
            "http://a/b/c/g"
        );
    }

    #[test]
    fn empty_base_path_has_no_directories() {
        let base = Uri::parse("http://a").unwrap();
        assert_eq!(
            base.relativize("http://a/g", FormMask::ALL).unwrap(),
            "/g"
        );
    }

    #[test]
    fn empty_segment_after_directory_keeps_relative_form() {
        let base = Uri::parse("http://a/b/c").unwrap();
        let reference = base.relativize("http://a/b//x", FormMask::RELATIVE).unwrap();
        assert_eq!(reference, ".//x");
        assert_eq!(base.resolve(&reference).unwrap().as_str(), "http://a/b//x");
    }

    #[test]
    fn colon_in_first_segment_is_not_a_scheme() {
        let base = Uri::parse("http://a/b/c").unwrap();
        let reference = base.relativize("http://a/b/ab:c", FormMask::RELATIVE).unwrap();
        assert_eq!(reference, "./ab:c");
        assert_eq!(base.resolve(&reference).unwrap().as_str(), "http://a/b/ab:c");
        assert_eq!(
            base.relativize("http://a/b/x/ab:c", FormMask::RELATIVE).unwrap(),
            "x/ab:c"
        );
        assert_eq!(
            base.relativize("http://a/ab:c", FormMask::PARENT).unwrap(),
            "../ab:c"
        );
    }

    #[test]
    fn opaque_base_ignores_network_form() {
        let base = Uri::parse("urn:x").unwrap();
        assert_eq!(
            base.relativize("urn://h/p", FormMask::NETWORK).unwrap(),
            "urn://h/p"
        );
    }

    #[test]
    fn mask_display() {
        assert_eq!(FormMask::NONE.to_string(), "NONE");
        assert_eq!(
            (FormMask::NETWORK | FormMask::PARENT).to_string(),
            "NETWORK | PARENT"
        );
    }

    #[test]
    fn mask_bits() {
        assert_eq!(FormMask::from_bits_truncate(0xff), FormMask::ALL);
        assert_eq!(FormMask::ALL.bits(), 63);
        assert!(FormMask::NONE.is_empty());
        let mut flags = FormMask::RELATIVE;
        flags |= FormMask::PARENT;
        assert_eq!(flags & FormMask::PARENT, FormMask::PARENT);
    }
}
