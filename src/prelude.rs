//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uriref::prelude::*;
//!
//! let base = Uri::parse("http://example.org/a/b").unwrap();
//! assert_eq!(base.relativize("http://example.org/a/c", FormMask::ALL).unwrap(), "c");
//! ```
//!
//! Builder state markers (`Empty`, `HasScheme`) are intentionally excluded
//! as they are implementation details.

pub use crate::{
    // Core types
    Component, FormMask, Uri,
    // Builder
    UriBuilder,
    // Errors
    MalformedUriError,
};
