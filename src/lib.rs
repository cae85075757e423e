//! RFC 2396 URI references.
//!
//! This crate parses URI references into their components, resolves relative
//! references against a base URI, and computes the inverse: the shortest
//! reference that, resolved against a base, gives back a target URI.
//!
//! # Overview
//!
//! ```text
//! scheme "://" [ userinfo "@" ] host [ ":" port ] path [ "?" query ] [ "#" fragment ]
//! scheme ":" opaque-path [ "#" fragment ]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use uriref::{FormMask, Uri};
//!
//! // Parse an absolute URI
//! let base = Uri::parse("http://example.org/docs/guide/intro.html").unwrap();
//! assert_eq!(base.host(), Some("example.org"));
//!
//! // Resolve a relative reference
//! let target = base.resolve("../api/index.html#top").unwrap();
//! assert_eq!(target.as_str(), "http://example.org/docs/api/index.html#top");
//!
//! // And back again
//! let reference = base.relativize(target.as_str(), FormMask::ALL).unwrap();
//! assert_eq!(reference, "../api/index.html#top");
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use uriref::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .scheme("http")
//!     .host("example.org")
//!     .path("/a")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(uri.as_str(), "http://example.org/a");
//! ```
//!
//! # Grammar
//!
//! Validation uses the ASCII character classes of RFC 2396, see [`grammar`].
//! Hosts are hostnames or dotted-decimal IPv4 addresses; IPv6 literals,
//! IDNA and percent-decoding are not supported.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_arguments)]

mod builder;
mod constants;
mod error;
pub mod grammar;
#[cfg(kani)]
mod kani_impls;
mod parser;
pub mod prelude;
mod relativize;
mod resolve;
mod uri;

pub use builder::{Empty, HasScheme, UriBuilder};
pub use constants::{
    EXCLUDED_CHARACTERS, MAX_HOST_LENGTH, MAX_PORT, MIN_SCHEME_LENGTH, RESERVED_CHARACTERS,
    SCHEME_CHARACTERS, USERINFO_CHARACTERS,
};
pub use error::{Component, MalformedUriError};
pub use relativize::FormMask;
pub use resolve::remove_dot_segments;
pub use uri::Uri;
