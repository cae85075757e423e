//! Character classes and composite validators of the RFC 2396 grammar.
//!
//! # Grammar Reference
//!
//! ```abnf
//! reserved   = ";" / "/" / "?" / ":" / "@" / "&" / "=" / "+" / "$" / "," / "[" / "]"
//! scheme     = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
//! hostname   = *( domainlabel "." ) toplabel [ "." ]
//! IPv4address = 1*DIGIT "." 1*DIGIT "." 1*DIGIT "." 1*DIGIT
//! escaped    = "%" HEXDIG HEXDIG
//! ```
//!
//! Every character that is not reserved and not one of `#%[]` counts as
//! unreserved, so the classifier accepts characters outside the RFC mark set.

use crate::constants::{
    EXCLUDED_CHARACTERS, MAX_HOST_LENGTH, RESERVED_CHARACTERS, SCHEME_CHARACTERS,
    USERINFO_CHARACTERS,
};

/// Returns true for `0`-`9`.
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Returns true for ASCII letters.
#[must_use]
pub const fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Returns true for ASCII letters and digits.
#[must_use]
pub const fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns true for hexadecimal digits of either case.
#[must_use]
pub const fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Returns true for members of `;/?:@&=+$,[]`.
#[must_use]
pub fn is_reserved_char(c: char) -> bool {
    RESERVED_CHARACTERS.contains(c)
}

/// Returns true for characters that are neither reserved nor in `#%[]`.
#[must_use]
pub fn is_unreserved_char(c: char) -> bool {
    !is_reserved_char(c) && !EXCLUDED_CHARACTERS.contains(c)
}

/// Returns true for characters allowed after the first letter of a scheme.
#[must_use]
pub fn is_scheme_char(c: char) -> bool {
    is_alphanumeric(c) || SCHEME_CHARACTERS.contains(c)
}

/// Returns true for unescaped characters allowed in userinfo.
#[must_use]
pub fn is_userinfo_char(c: char) -> bool {
    is_unreserved_char(c) || USERINFO_CHARACTERS.contains(c)
}

/// Returns true if `scheme` is a letter followed by letters, digits, `+`, `-` or `.`.
///
/// # Examples
///
/// ```
/// use uriref::grammar::is_conformant_scheme_name;
///
/// assert!(is_conformant_scheme_name("svn+ssh"));
/// assert!(!is_conformant_scheme_name("1http"));
/// assert!(!is_conformant_scheme_name(""));
/// ```
#[must_use]
pub fn is_conformant_scheme_name(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if is_alpha(first) => chars.all(is_scheme_char),
        _ => false,
    }
}

/// Returns true if `address` is a dotted-decimal IPv4 address or a hostname.
///
/// An address whose right-most label starts with a digit is read as IPv4
/// and must consist of exactly four digit groups. Otherwise every label
/// must consist of alphanumerics and hyphens and be bounded by
/// alphanumerics. A single trailing `.` is allowed on hostnames.
///
/// # Examples
///
/// ```
/// use uriref::grammar::is_well_formed_address;
///
/// assert!(is_well_formed_address("www.example.org"));
/// assert!(is_well_formed_address("192.168.0.1"));
/// assert!(!is_well_formed_address("192.168.0"));
/// assert!(!is_well_formed_address("-bad.example"));
/// ```
#[must_use]
pub fn is_well_formed_address(address: &str) -> bool {
    let bytes = address.as_bytes();
    let len = bytes.len();
    if len == 0 || len > MAX_HOST_LENGTH {
        return false;
    }
    if address.starts_with('.') || address.starts_with('-') {
        return false;
    }

    // The right-most label decides between IPv4 and hostname.
    let trimmed = address.strip_suffix('.').unwrap_or(address);
    let label_start = trimmed.rfind('.').map_or(0, |i| i + 1);
    let ipv4 = bytes.get(label_start).is_some_and(u8::is_ascii_digit);

    if ipv4 {
        is_dotted_decimal(bytes)
    } else {
        is_hostname(bytes)
    }
}

fn is_dotted_decimal(bytes: &[u8]) -> bool {
    let mut dots = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'.' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            if !before.is_some_and(u8::is_ascii_digit) {
                return false;
            }
            if bytes.get(i + 1).is_some_and(|after| !after.is_ascii_digit()) {
                return false;
            }
            dots += 1;
        } else if !b.is_ascii_digit() {
            return false;
        }
    }
    dots == 3 && bytes.last().is_some_and(u8::is_ascii_digit)
}

fn is_hostname(bytes: &[u8]) -> bool {
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'.' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            if !before.is_some_and(u8::is_ascii_alphanumeric) {
                return false;
            }
            if bytes.get(i + 1).is_some_and(|after| !after.is_ascii_alphanumeric()) {
                return false;
            }
        } else if !b.is_ascii_alphanumeric() && b != b'-' {
            return false;
        }
    }
    bytes.last().is_some_and(|&b| b == b'.' || b.is_ascii_alphanumeric())
}

/// Returns true if every character of `s` is reserved, unreserved or part
/// of a valid `%HH` escape.
///
/// # Examples
///
/// ```
/// use uriref::grammar::is_uri_string;
///
/// assert!(is_uri_string("a/b?c=%41"));
/// assert!(!is_uri_string("100%"));
/// assert!(!is_uri_string("a#b"));
/// ```
#[must_use]
pub fn is_uri_string(s: &str) -> bool {
    scan(s, |c| is_reserved_char(c) || is_unreserved_char(c)).is_ok()
}

/// The first grammar violation found by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    /// A `%` not followed by two hex digits.
    BadEscape,
    /// A character outside the allowed class.
    BadChar(char),
}

/// Checks that every character of `s` is either allowed by `allowed` or
/// starts a valid `%HH` escape.
pub(crate) fn scan(s: &str, allowed: impl Fn(char) -> bool) -> Result<(), Violation> {
    let bytes = s.as_bytes();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '%' {
            let escaped = matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()
            );
            if !escaped {
                return Err(Violation::BadEscape);
            }
            chars.nth(1);
        } else if !allowed(c) {
            return Err(Violation::BadChar(c));
        }
    }
    Ok(())
}
