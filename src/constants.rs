//! Character sets and limits of the RFC 2396 grammar.

/// Reserved characters. `[` and `]` are included per RFC 2732.
pub const RESERVED_CHARACTERS: &str = ";/?:@&=+$,[]";

/// Characters that are neither reserved nor unreserved.
pub const EXCLUDED_CHARACTERS: &str = "#%[]";

/// Characters allowed in a scheme name after the leading letter,
/// besides alphanumerics.
pub const SCHEME_CHARACTERS: &str = "+-.";

/// Reserved characters allowed in userinfo.
pub const USERINFO_CHARACTERS: &str = ";:&=+$,";

/// Maximum length of a host.
pub const MAX_HOST_LENGTH: usize = 255;

/// Highest valid port number.
pub const MAX_PORT: u16 = 65535;

/// Minimum index of the colon terminating a scheme.
///
/// One-letter prefixes such as `C:` are drive letters, not schemes.
pub const MIN_SCHEME_LENGTH: usize = 2;
