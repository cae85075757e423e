//! Splitting a URI reference string into its components.
//!
//! ```text
//! URI-reference = [ scheme ":" ] [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//! authority     = [ userinfo "@" ] host [ ":" port ]
//! ```
//!
//! The split is a single left-to-right pass. A `?` only starts a query when
//! the reference is hierarchical or relative; in an opaque URI such as
//! `mailto:a?b` it belongs to the opaque path.

use crate::constants::MIN_SCHEME_LENGTH;
use crate::error::{Component, MalformedUriError};
use crate::grammar::{
    self, Violation, is_conformant_scheme_name, is_reserved_char, is_unreserved_char,
    is_userinfo_char, is_well_formed_address,
};
use crate::uri::Uri;

/// Staging record filled by the parser before a [`Uri`] is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Components {
    pub(crate) scheme: Option<String>,
    pub(crate) userinfo: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Option<String>,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl Components {
    pub(crate) fn from_uri(uri: &Uri) -> Self {
        Self {
            scheme: Some(uri.scheme().to_string()),
            userinfo: uri.userinfo().map(str::to_string),
            host: uri.host().map(str::to_string),
            port: uri.port(),
            path: uri.path().map(str::to_string),
            query: uri.query().map(str::to_string),
            fragment: uri.fragment().map(str::to_string),
        }
    }
}

/// Splits `input` into components, validating each one.
///
/// Without a base, the reference must carry a scheme. With an opaque base,
/// only a bare fragment reference is accepted.
pub(crate) fn split(input: &str, base: Option<&Uri>) -> Result<Components, MalformedUriError> {
    let mut components = Components::default();

    let rest = match scheme_delimiter(input) {
        Some(colon) => {
            let scheme = &input[..colon];
            validate_scheme(scheme)?;
            if colon + 1 == input.len() {
                return Err(MalformedUriError::BareScheme {
                    input: input.to_string(),
                });
            }
            components.scheme = Some(scheme.to_string());
            &input[colon + 1..]
        }
        None => {
            let Some(base) = base else {
                return Err(MalformedUriError::NoSchemeFound {
                    input: input.to_string(),
                });
            };
            if !base.is_hierarchical() && !input.starts_with('#') {
                return Err(MalformedUriError::CannotRelativizeOpaqueBase {
                    base: base.as_str().to_string(),
                    reference: input.to_string(),
                });
            }
            input
        }
    };

    let rest = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            let (userinfo, host, port) = parse_authority(&after[..end])?;
            components.userinfo = userinfo;
            components.host = Some(host);
            components.port = port;
            &after[end..]
        }
        None => rest,
    };

    let opaque = components.scheme.is_some() && components.host.is_none();
    let (path, query, fragment) = split_tail(rest, opaque);
    validate_path(path)?;
    if let Some(query) = query {
        validate_query(query)?;
    }
    if let Some(fragment) = fragment {
        validate_fragment(fragment)?;
    }
    components.path = Some(path.to_string());
    components.query = query.map(str::to_string);
    components.fragment = fragment.map(str::to_string);

    Ok(components)
}

/// Returns the index of the colon ending the scheme, if the reference has one.
///
/// The colon must come before any `/`, `?` or `#`, and at an index of at
/// least two so that drive letters are not taken for schemes.
fn scheme_delimiter(input: &str) -> Option<usize> {
    let colon = input.find(':')?;
    let delimiter = input.find(['/', '?', '#']).unwrap_or(input.len());
    (colon >= MIN_SCHEME_LENGTH && colon < delimiter).then_some(colon)
}

/// Splits an authority span into userinfo, host and port.
///
/// An empty host is allowed and still marks the URI hierarchical; a port
/// after an empty host is ignored.
fn parse_authority(
    authority: &str,
) -> Result<(Option<String>, String, Option<u16>), MalformedUriError> {
    let (userinfo, host_port) = match authority.rfind('@') {
        Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
        None => (None, authority),
    };

    let (host, port) = match host_port.find(':') {
        Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
        None => (host_port, None),
    };

    let port = match port {
        Some(port) if !host.is_empty() && !port.is_empty() => Some(parse_port(port)?),
        _ => None,
    };
    validate_host(host)?;
    if let Some(userinfo) = userinfo {
        validate_userinfo(userinfo)?;
    }

    Ok((userinfo.map(str::to_string), host.to_string(), port))
}

/// Splits the text after the authority into path, query and fragment.
fn split_tail(rest: &str, opaque: bool) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match rest.find('#') {
        Some(hash) => (&rest[..hash], Some(&rest[hash + 1..])),
        None => (rest, None),
    };
    if opaque {
        return (rest, None, fragment);
    }
    match rest.find('?') {
        Some(q) => (&rest[..q], Some(&rest[q + 1..]), fragment),
        None => (rest, None, fragment),
    }
}

pub(crate) fn validate_scheme(scheme: &str) -> Result<(), MalformedUriError> {
    if is_conformant_scheme_name(scheme) {
        Ok(())
    } else {
        Err(MalformedUriError::InvalidSchemeName {
            scheme: scheme.to_string(),
        })
    }
}

/// Accepts the empty host as well as well formed addresses.
pub(crate) fn validate_host(host: &str) -> Result<(), MalformedUriError> {
    if host.is_empty() || is_well_formed_address(host) {
        Ok(())
    } else {
        Err(MalformedUriError::InvalidHost {
            host: host.to_string(),
        })
    }
}

pub(crate) fn parse_port(port: &str) -> Result<u16, MalformedUriError> {
    if !port.chars().all(grammar::is_digit) {
        return Err(MalformedUriError::InvalidPort {
            value: port.to_string(),
            reason: "port should only contain digits",
        });
    }
    port.parse().map_err(|_| MalformedUriError::InvalidPort {
        value: port.to_string(),
        reason: "port must be 0-65535",
    })
}

pub(crate) fn validate_userinfo(userinfo: &str) -> Result<(), MalformedUriError> {
    grammar::scan(userinfo, is_userinfo_char).map_err(|v| match v {
        Violation::BadEscape => escape_error(Component::Userinfo, userinfo),
        Violation::BadChar(character) => MalformedUriError::InvalidUserinfo {
            userinfo: userinfo.to_string(),
            character,
        },
    })
}

/// `[` and `]` are reserved but only legal in the host, never in a path.
pub(crate) fn validate_path(path: &str) -> Result<(), MalformedUriError> {
    let allowed = |c| c != '[' && c != ']' && is_uric(c);
    grammar::scan(path, allowed).map_err(|v| match v {
        Violation::BadEscape => escape_error(Component::Path, path),
        Violation::BadChar(character) => MalformedUriError::InvalidPathCharacter {
            path: path.to_string(),
            character,
        },
    })
}

pub(crate) fn validate_query(query: &str) -> Result<(), MalformedUriError> {
    grammar::scan(query, is_uric).map_err(|v| match v {
        Violation::BadEscape => escape_error(Component::Query, query),
        Violation::BadChar(character) => MalformedUriError::InvalidQueryCharacter {
            query: query.to_string(),
            character,
        },
    })
}

pub(crate) fn validate_fragment(fragment: &str) -> Result<(), MalformedUriError> {
    grammar::scan(fragment, is_uric).map_err(|v| match v {
        Violation::BadEscape => escape_error(Component::Fragment, fragment),
        Violation::BadChar(character) => MalformedUriError::InvalidFragmentCharacter {
            fragment: fragment.to_string(),
            character,
        },
    })
}

fn is_uric(c: char) -> bool {
    is_reserved_char(c) || is_unreserved_char(c)
}

fn escape_error(component: Component, value: &str) -> MalformedUriError {
    MalformedUriError::InvalidEscapeSequence {
        component,
        value: value.to_string(),
    }
}
