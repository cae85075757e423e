//! Error types for URI parsing, resolution and relativization.

use std::fmt;

/// A URI component whose content can carry `%HH` escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The userinfo before `@` in the authority
    Userinfo,
    /// The path
    Path,
    /// The query after `?`
    Query,
    /// The fragment after `#`
    Fragment,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Userinfo => "userinfo",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        })
    }
}

/// Errors that can occur when constructing a [`Uri`](crate::Uri).
///
/// Construction is atomic: when one of these is returned, no part of the
/// input is observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedUriError {
    /// The reference has no scheme and there is no base to resolve it against
    #[error("no scheme found in URI '{input}'")]
    NoSchemeFound {
        /// The rejected reference
        input: String,
    },
    /// A relative reference other than a bare fragment was applied to an opaque base
    #[error("cannot apply relative reference '{reference}' to opaque URI '{base}'")]
    CannotRelativizeOpaqueBase {
        /// The opaque base
        base: String,
        /// The relative reference
        reference: String,
    },
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    #[error("scheme '{scheme}' is not conformant")]
    InvalidSchemeName {
        /// The rejected scheme
        scheme: String,
    },
    /// Nothing follows the scheme
    #[error("a bare scheme name is not a URI: '{input}'")]
    BareScheme {
        /// The rejected input
        input: String,
    },
    /// The host is neither an IPv4 address nor a hostname
    #[error("host '{host}' is not a well formed address")]
    InvalidHost {
        /// The rejected host
        host: String,
    },
    /// The port is not a number in 0-65535
    #[error("invalid port '{value}': {reason}")]
    InvalidPort {
        /// The rejected port text
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// The userinfo contains a character outside its class
    #[error("userinfo '{userinfo}' contains invalid character '{character}'")]
    InvalidUserinfo {
        /// The rejected userinfo
        userinfo: String,
        /// The offending character
        character: char,
    },
    /// The path contains a character outside its class
    #[error("path '{path}' contains invalid character '{character}'")]
    InvalidPathCharacter {
        /// The rejected path
        path: String,
        /// The offending character
        character: char,
    },
    /// The query contains a character outside its class
    #[error("query '{query}' contains invalid character '{character}'")]
    InvalidQueryCharacter {
        /// The rejected query
        query: String,
        /// The offending character
        character: char,
    },
    /// The fragment contains a character outside its class
    #[error("fragment '{fragment}' contains invalid character '{character}'")]
    InvalidFragmentCharacter {
        /// The rejected fragment
        fragment: String,
        /// The offending character
        character: char,
    },
    /// A `%` is not followed by two hex digits
    #[error("{component} '{value}' contains an invalid escape sequence")]
    InvalidEscapeSequence {
        /// The component holding the escape
        component: Component,
        /// The rejected component text
        value: String,
    },
    /// Components were given that cannot appear together
    #[error("illegal component combination: {reason}")]
    IllegalComponentCombination {
        /// Which combination was rejected
        reason: &'static str,
    },
}

impl MalformedUriError {
    /// Returns the component an escape or character error was found in, if any.
    #[must_use]
    pub const fn component(&self) -> Option<Component> {
        match self {
            Self::InvalidUserinfo { .. } => Some(Component::Userinfo),
            Self::InvalidPathCharacter { .. } => Some(Component::Path),
            Self::InvalidQueryCharacter { .. } => Some(Component::Query),
            Self::InvalidFragmentCharacter { .. } => Some(Component::Fragment),
            Self::InvalidEscapeSequence { component, .. } => Some(*component),
            _ => None,
        }
    }
}
