//! The URI value type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::constants::MIN_SCHEME_LENGTH;
use crate::error::MalformedUriError;
use crate::parser::{self, Components};
use crate::resolve;

/// A parsed, validated and immutable URI.
///
/// Every `Uri` has a scheme. It is hierarchical when it was written with a
/// `//` authority, possibly empty:
///
/// ```text
/// hierarchical: scheme "://" [ userinfo "@" ] host [ ":" port ] path [ "?" query ] [ "#" fragment ]
/// opaque:       scheme ":" path [ "#" fragment ]
/// ```
///
/// Absent and empty components are distinct: `http://a/?` has an empty
/// query, `http://a/` has none.
///
/// # Examples
///
/// ```
/// use uriref::Uri;
///
/// let uri = Uri::parse("http://joe@example.org:8080/a/b?x=1#top").unwrap();
/// assert_eq!(uri.scheme(), "http");
/// assert_eq!(uri.userinfo(), Some("joe"));
/// assert_eq!(uri.host(), Some("example.org"));
/// assert_eq!(uri.port(), Some(8080));
/// assert_eq!(uri.path(), Some("/a/b"));
/// assert_eq!(uri.query(), Some("x=1"));
/// assert_eq!(uri.fragment(), Some("top"));
/// assert!(uri.is_hierarchical());
///
/// let uri = Uri::parse("mailto:joe@example.org").unwrap();
/// assert!(!uri.is_hierarchical());
/// assert_eq!(uri.path(), Some("joe@example.org"));
/// ```
#[derive(Clone)]
pub struct Uri {
    scheme: String,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    /// Serialized form
    serialized: String,
    /// Ancestor directories of the path, filled on first relativization
    ancestors: OnceLock<Vec<String>>,
}

impl Uri {
    /// Parses an absolute URI reference.
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` if:
    /// - The reference has no scheme (`NoSchemeFound`)
    /// - The scheme, host, port or userinfo is invalid
    /// - The path, query or fragment has an invalid character or escape
    pub fn parse(input: &str) -> Result<Self, MalformedUriError> {
        parser::split(input, None)
            .and_then(Self::commit)
            .inspect_err(|e| tracing::debug!(input, error = %e, "rejected URI"))
    }

    /// Parses `reference` and resolves it against `base`.
    ///
    /// Equivalent to [`Uri::resolve`].
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` if the reference is malformed, or if it is
    /// relative (other than a bare fragment) and `base` is opaque.
    pub fn with_base(base: &Self, reference: &str) -> Result<Self, MalformedUriError> {
        base.resolve(reference)
    }

    /// Creates a URI from a scheme and the text that follows `scheme:`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` if either part is empty or the result is
    /// not a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::from_scheme_specific_part("urn", "isbn:0451450523").unwrap();
    /// assert_eq!(uri.as_str(), "urn:isbn:0451450523");
    ///
    /// let uri = Uri::from_scheme_specific_part("http", "//example.org/a").unwrap();
    /// assert_eq!(uri.host(), Some("example.org"));
    /// ```
    pub fn from_scheme_specific_part(
        scheme: &str,
        scheme_specific_part: &str,
    ) -> Result<Self, MalformedUriError> {
        if scheme.is_empty() {
            return Err(MalformedUriError::IllegalComponentCombination {
                reason: "scheme is required",
            });
        }
        if scheme_specific_part.is_empty() {
            return Err(MalformedUriError::BareScheme {
                input: format!("{scheme}:"),
            });
        }
        parser::validate_scheme(scheme)?;
        Self::parse(&format!("{scheme}:{scheme_specific_part}"))
    }

    /// Creates a URI from a scheme, host, path, query and fragment.
    ///
    /// # Errors
    ///
    /// See [`Uri::from_parts`].
    pub fn from_host_parts(
        scheme: &str,
        host: Option<&str>,
        path: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, MalformedUriError> {
        Self::from_parts(scheme, None, host, None, path, query, fragment)
    }

    /// Creates a URI from all of its components.
    ///
    /// # Errors
    ///
    /// A hierarchical URI given no path, query or fragment gets an empty
    /// path, as `parse` would give it.
    ///
    /// Returns `MalformedUriError` if any component is invalid, or with
    /// `IllegalComponentCombination` if:
    /// - the scheme is a single character, which would read back as a path
    /// - userinfo or port is given without a host, or a port with an empty host
    /// - a query is given without a host or without a path
    /// - a fragment is given without a path
    /// - the path holds a `?` alongside a query, or a `#` alongside a fragment
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::from_parts(
    ///     "http", Some("joe"), Some("example.org"), Some(8080), Some("/a"), Some("x=1"), None,
    /// ).unwrap();
    /// assert_eq!(uri.as_str(), "http://joe@example.org:8080/a?x=1");
    ///
    /// assert!(Uri::from_parts("http", Some("joe"), None, None, Some("/a"), None, None).is_err());
    /// ```
    pub fn from_parts(
        scheme: &str,
        userinfo: Option<&str>,
        host: Option<&str>,
        port: Option<u16>,
        path: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, MalformedUriError> {
        if scheme.is_empty() {
            return Err(MalformedUriError::IllegalComponentCombination {
                reason: "scheme is required",
            });
        }
        if let Some(path) = path {
            if path.contains('?') && query.is_some() {
                return Err(MalformedUriError::IllegalComponentCombination {
                    reason: "query cannot be given in both the path and the query",
                });
            }
            if path.contains('#') && fragment.is_some() {
                return Err(MalformedUriError::IllegalComponentCombination {
                    reason: "fragment cannot be given in both the path and the fragment",
                });
            }
        }
        parser::validate_scheme(scheme)?;
        if let Some(host) = host {
            parser::validate_host(host)?;
        }
        if let Some(userinfo) = userinfo {
            parser::validate_userinfo(userinfo)?;
        }
        if let Some(path) = path {
            parser::validate_path(path)?;
        }
        if let Some(query) = query {
            parser::validate_query(query)?;
        }
        if let Some(fragment) = fragment {
            parser::validate_fragment(fragment)?;
        }

        Self::commit(Components {
            scheme: Some(scheme.to_string()),
            userinfo: userinfo.map(str::to_string),
            host: host.map(str::to_string),
            port,
            path: path.map(str::to_string),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }

    /// Checks the structural invariants and freezes the components.
    ///
    /// Every constructor ends here, so a `Uri` never exists in a state that
    /// violates them.
    pub(crate) fn commit(mut c: Components) -> Result<Self, MalformedUriError> {
        let Some(scheme) = c.scheme else {
            return Err(MalformedUriError::IllegalComponentCombination {
                reason: "scheme is required",
            });
        };
        let combination = |reason| Err(MalformedUriError::IllegalComponentCombination { reason });

        if scheme.len() < MIN_SCHEME_LENGTH {
            return combination("scheme must be at least two characters");
        }
        if c.host.as_deref() == Some("") && c.port.is_some() {
            return combination("port cannot be set when host is empty");
        }
        if c.host.is_some() && c.path.is_none() && c.query.is_none() && c.fragment.is_none() {
            c.path = Some(String::new());
        }
        if c.host.is_none() {
            if c.userinfo.is_some() {
                return combination("userinfo cannot be set when host is not set");
            }
            if c.port.is_some() {
                return combination("port cannot be set when host is not set");
            }
            if c.query.is_some() {
                return combination("query can only be set on a hierarchical URI");
            }
        }
        match c.path.as_deref() {
            None if c.query.is_some() => {
                return combination("query cannot be set when path is not set");
            }
            None if c.fragment.is_some() => {
                return combination("fragment cannot be set when path is not set");
            }
            None if c.host.is_none() => {
                return combination("opaque URI must have a path");
            }
            Some(path) if c.host.is_some() && !path.is_empty() && !path.starts_with('/') => {
                return combination("path must be empty or absolute when host is set");
            }
            Some(path) if c.host.is_some() && path.contains('?') => {
                return combination("query cannot be given in the path of a hierarchical URI");
            }
            Some(path) if c.host.is_none() && path.starts_with("//") => {
                return combination("opaque path cannot start with '//'");
            }
            Some("") if c.host.is_none() && c.fragment.is_none() => {
                return combination("opaque URI must have a non-empty path");
            }
            _ => {}
        }

        let serialized = serialize(
            &scheme,
            c.userinfo.as_deref(),
            c.host.as_deref(),
            c.port,
            c.path.as_deref(),
            c.query.as_deref(),
            c.fragment.as_deref(),
        );

        Ok(Self {
            scheme,
            userinfo: c.userinfo,
            host: c.host,
            port: c.port,
            path: c.path,
            query: c.query,
            fragment: c.fragment,
            serialized,
            ancestors: OnceLock::new(),
        })
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns everything after `scheme:`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://example.org/a?b#c").unwrap();
    /// assert_eq!(uri.scheme_specific_part(), "//example.org/a?b#c");
    /// ```
    #[must_use]
    pub fn scheme_specific_part(&self) -> &str {
        &self.serialized[self.scheme.len() + 1..]
    }

    /// Returns the userinfo, if present.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the host, if present. The empty string means an empty authority.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if specified.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path, empty for `http://a`.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the path with the query and fragment optionally appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://example.org/a?b#c").unwrap();
    /// assert_eq!(uri.path_with(false, false), "/a");
    /// assert_eq!(uri.path_with(true, false), "/a?b");
    /// assert_eq!(uri.path_with(true, true), "/a?b#c");
    /// ```
    #[must_use]
    pub fn path_with(&self, include_query: bool, include_fragment: bool) -> String {
        let mut result = self.path.clone().unwrap_or_default();
        if let Some(query) = self.query.as_deref().filter(|_| include_query) {
            result.push('?');
            result.push_str(query);
        }
        if let Some(fragment) = self.fragment.as_deref().filter(|_| include_fragment) {
            result.push('#');
            result.push_str(fragment);
        }
        result
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns true if the URI has a `//` authority.
    #[must_use]
    pub const fn is_hierarchical(&self) -> bool {
        self.host.is_some()
    }

    /// Returns the serialized URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Consumes the URI and returns its serialized form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.serialized
    }

    /// Returns the base directory, its parent and its grandparent, closest
    /// first, stopping early at the root.
    pub(crate) fn ancestors(&self) -> &[String] {
        self.ancestors
            .get_or_init(|| resolve::ancestor_directories(self.path.as_deref()))
    }
}

fn serialize(
    scheme: &str,
    userinfo: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
    path: Option<&str>,
    query: Option<&str>,
    fragment: Option<&str>,
) -> String {
    let mut result = format!("{scheme}:");

    if let Some(host) = host {
        result.push_str("//");
        if let Some(userinfo) = userinfo {
            result.push_str(userinfo);
            result.push('@');
        }
        result.push_str(host);
        if let Some(port) = port {
            result.push(':');
            result.push_str(&port.to_string());
        }
    }
    if let Some(path) = path {
        result.push_str(path);
    }
    if let Some(query) = query {
        result.push('?');
        result.push_str(query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }

    result
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.userinfo == other.userinfo
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialized.hash(state);
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("userinfo", &self.userinfo)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for Uri {
    type Err = MalformedUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

impl TryFrom<&str> for Uri {
    type Error = MalformedUriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialized.cmp(&other.serialized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.serialized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
