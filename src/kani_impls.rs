//! Kani proof harnesses for the character grammar and path normalization.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::grammar;
use crate::resolve::remove_dot_segments;

/// Characters path segments are drawn from; dots and slashes stress normalization
const PATH_CHARS: &[u8] = b"ab./";

/// Generate a short path over `PATH_CHARS` starting with '/'
fn arbitrary_path(max: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max + 1);
    let mut path = String::from("/");
    for _ in 0..len {
        let idx: usize = kani::any();
        path.push(PATH_CHARS[idx % PATH_CHARS.len()] as char);
    }
    path
}

/// Proof: No character is both reserved and unreserved
#[kani::proof]
fn proof_reserved_unreserved_disjoint() {
    let c: char = kani::any();
    assert!(!(grammar::is_reserved_char(c) && grammar::is_unreserved_char(c)));
}

/// Proof: A scheme character is alphanumeric or one of "+-."
#[kani::proof]
fn proof_scheme_chars() {
    let c: char = kani::any();
    if grammar::is_scheme_char(c) {
        assert!(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    }
}

/// Proof: A conformant scheme name starts with a letter
#[kani::proof]
#[kani::unwind(5)]
fn proof_conformant_scheme_starts_with_alpha() {
    let bytes: [u8; 3] = kani::any();
    let Ok(s) = std::str::from_utf8(&bytes) else {
        return;
    };
    if grammar::is_conformant_scheme_name(s) {
        assert!(s.as_bytes()[0].is_ascii_alphabetic());
    }
}

/// Proof: Normalization never lengthens a path and keeps the leading '/'
#[kani::proof]
#[kani::unwind(8)]
fn proof_remove_dot_segments_shrinks() {
    let path = arbitrary_path(5);
    let normalized = remove_dot_segments(path.clone());
    assert!(normalized.len() <= path.len());
    assert!(normalized.starts_with('/'));
}

/// Proof: Normalization is idempotent
#[kani::proof]
#[kani::unwind(8)]
fn proof_remove_dot_segments_idempotent() {
    let path = arbitrary_path(5);
    let once = remove_dot_segments(path);
    assert_eq!(remove_dot_segments(once.clone()), once);
}
