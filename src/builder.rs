//! Typestate builder for constructing [`Uri`] instances.
//!
//! The scheme is the one required component, so the builder only offers
//! `build()` once it has been set.

use std::marker::PhantomData;

use crate::error::MalformedUriError;
use crate::uri::Uri;

/// Marker: No scheme set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: The scheme has been set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasScheme;

/// A typestate builder for constructing [`Uri`] instances.
///
/// Validation happens in [`build`](UriBuilder::build), which applies the
/// same checks as [`Uri::from_parts`].
///
/// # Examples
///
/// ```
/// use uriref::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("http")
///     .host("example.org")
///     .port(8080)
///     .path("/a/b")
///     .query("x=1")
///     .build()
///     .unwrap();
///
/// assert_eq!(uri.as_str(), "http://example.org:8080/a/b?x=1");
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use uriref::UriBuilder;
///
/// // Error: cannot call build() before scheme()
/// let uri = UriBuilder::new().host("example.org").build();
/// ```
#[derive(Debug, Clone)]
pub struct UriBuilder<State = Empty> {
    scheme: String,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    _state: PhantomData<State>,
}

impl UriBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: String::new(),
            userinfo: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
            _state: PhantomData,
        }
    }

    /// Sets the scheme and advances to the [`HasScheme`] state.
    #[must_use]
    pub fn scheme(self, scheme: &str) -> UriBuilder<HasScheme> {
        UriBuilder {
            scheme: scheme.to_string(),
            userinfo: self.userinfo,
            host: self.host,
            port: self.port,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

impl Default for UriBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl UriBuilder<HasScheme> {
    /// Builds the URI.
    ///
    /// # Errors
    ///
    /// Returns `MalformedUriError` for the same reasons as [`Uri::from_parts`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{MalformedUriError, UriBuilder};
    ///
    /// let result = UriBuilder::new().scheme("http").userinfo("joe").path("/a").build();
    /// assert!(matches!(result, Err(MalformedUriError::IllegalComponentCombination { .. })));
    /// ```
    pub fn build(self) -> Result<Uri, MalformedUriError> {
        Uri::from_parts(
            &self.scheme,
            self.userinfo.as_deref(),
            self.host.as_deref(),
            self.port,
            self.path.as_deref(),
            self.query.as_deref(),
            self.fragment.as_deref(),
        )
    }
}

impl<S> UriBuilder<S> {
    /// Sets the userinfo. Requires a host.
    #[must_use]
    pub fn userinfo(mut self, userinfo: &str) -> Self {
        self.userinfo = Some(userinfo.to_string());
        self
    }

    /// Sets the host, making the URI hierarchical. The host may be empty.
    #[must_use]
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Sets the port. Requires a host.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Sets the query. Requires a host and a path.
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    /// Sets the fragment. Requires a path.
    #[must_use]
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.fragment = Some(fragment.to_string());
        self
    }

    /// Sets the userinfo if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_userinfo(self, userinfo: Option<&str>) -> Self {
        match userinfo {
            Some(u) => self.userinfo(u),
            None => self,
        }
    }

    /// Sets the port if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_port(self, port: Option<u16>) -> Self {
        match port {
            Some(p) => self.port(p),
            None => self,
        }
    }

    /// Sets the query if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_query(self, query: Option<&str>) -> Self {
        match query {
            Some(q) => self.query(q),
            None => self,
        }
    }

    /// Sets the fragment if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_fragment(self, fragment: Option<&str>) -> Self {
        match fragment {
            Some(f) => self.fragment(f),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_full_uri() {
        let uri = UriBuilder::new()
            .scheme("http")
            .userinfo("joe")
            .host("example.org")
            .port(8080)
            .path("/a")
            .query("q")
            .fragment("f")
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "http://joe@example.org:8080/a?q#f");
    }

    #[test]
    fn components_can_precede_scheme() {
        let uri = UriBuilder::new()
            .host("example.org")
            .path("/a")
            .scheme("https")
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "https://example.org/a");
    }

    #[test]
    fn builds_opaque_uri() {
        let uri = UriBuilder::new()
            .scheme("urn")
            .path("isbn:0451450523")
            .fragment("p1")
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "urn:isbn:0451450523#p1");
        assert!(!uri.is_hierarchical());
    }

    #[test]
    fn maybe_setters() {
        let uri = UriBuilder::new()
            .scheme("http")
            .host("a")
            .path("/")
            .maybe_userinfo(None)
            .maybe_port(Some(81))
            .maybe_query(Some("x"))
            .maybe_fragment(None)
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "http://a:81/?x");
    }

    #[test]
    fn last_value_wins() {
        let uri = UriBuilder::new()
            .scheme("http")
            .host("a")
            .host("b")
            .path("/")
            .build()
            .unwrap();
        assert_eq!(uri.host(), Some("b"));
    }

    #[test]
    fn invalid_scheme_fails() {
        let result = UriBuilder::new().scheme("1x").path("y").build();
        assert!(matches!(
            result,
            Err(MalformedUriError::InvalidSchemeName { .. })
        ));
    }

    #[test]
    fn port_without_host_fails() {
        let result = UriBuilder::new().scheme("x").port(1).path("y").build();
        assert!(matches!(
            result,
            Err(MalformedUriError::IllegalComponentCombination { .. })
        ));
    }
}
