//! Relativization against `http://a/b/c/d;p?q` under each form mask.

use uriref::{FormMask, Uri};

const BASE: &str = "http://a/b/c/d;p?q";

fn relativize(target: &str, flags: FormMask) -> String {
    Uri::parse(BASE).unwrap().relativize(target, flags).unwrap()
}

#[test]
fn all_forms_pick_the_shortest() {
    for (target, expected) in [
        ("http://a/b/c/d;p?q", ""),
        ("http://a/b/c/d;p?q#s", "#s"),
        ("http://a/b/c/d;p?y", "d;p?y"),
        ("http://a/b/c/g", "g"),
        ("http://a/b/c/g/h?y#s", "g/h?y#s"),
        ("http://a/b/c/", "."),
        ("http://a/b/g", "../g"),
        ("http://a/b/", ".."),
        ("http://a/g", "../../g"),
        ("http://a/", "../.."),
        ("http://b/g", "//b/g"),
        ("ftp://a/b/c/g", "ftp://a/b/c/g"),
    ] {
        assert_eq!(relativize(target, FormMask::ALL), expected, "target {target:?}");
    }
}

#[test]
fn same_document_alone() {
    assert_eq!(relativize("http://a/b/c/d;p?q#s", FormMask::SAME_DOCUMENT), "#s");
    assert_eq!(
        relativize("http://a/b/c/g", FormMask::SAME_DOCUMENT),
        "http://a/b/c/g"
    );
}

#[test]
fn relative_alone_stays_in_the_base_directory() {
    assert_eq!(relativize("http://a/b/c/g", FormMask::RELATIVE), "g");
    assert_eq!(relativize("http://a/b/g", FormMask::RELATIVE), "http://a/b/g");
}

#[test]
fn parent_alone_skips_the_base_directory() {
    assert_eq!(relativize("http://a/b/c/g", FormMask::PARENT), "../c/g");
    assert_eq!(relativize("http://a/b/g", FormMask::PARENT), "../g");
    assert_eq!(relativize("http://a/g", FormMask::PARENT), "http://a/g");
}

#[test]
fn grandparent_alone_reaches_the_root() {
    assert_eq!(relativize("http://a/b/c/g", FormMask::GRANDPARENT), "../../b/c/g");
    assert_eq!(relativize("http://a/g", FormMask::GRANDPARENT), "../../g");
    assert_eq!(relativize("http://a/", FormMask::GRANDPARENT), "../..");
}

#[test]
fn relative_and_grandparent_without_parent() {
    let flags = FormMask::RELATIVE | FormMask::GRANDPARENT;
    assert_eq!(relativize("http://a/b/c/g", flags), "g");
    assert_eq!(relativize("http://a/b/g", flags), "../../b/g");
}

#[test]
fn absolute_path_after_relative_forms_fail() {
    let flags = FormMask::RELATIVE | FormMask::ABSOLUTE;
    assert_eq!(relativize("http://a/b/c/g", flags), "g");
    assert_eq!(relativize("http://a/b/g", flags), "/b/g");
    assert_eq!(relativize("http://a/x?y#z", flags), "/x?y#z");
}

#[test]
fn network_path_alone() {
    assert_eq!(relativize("http://a/b/c/g", FormMask::NETWORK), "//a/b/c/g");
    assert_eq!(relativize("http://u@a:8/g", FormMask::NETWORK), "//u@a:8/g");
    assert_eq!(relativize("https://a/g", FormMask::NETWORK), "https://a/g");
}

#[test]
fn differing_userinfo_is_another_authority() {
    assert_eq!(
        relativize("http://u@a/b/c/g", FormMask::ALL),
        "//u@a/b/c/g"
    );
}

#[test]
fn no_forms_returns_the_target() {
    assert_eq!(relativize("http://a/b/c/g", FormMask::NONE), "http://a/b/c/g");
    assert_eq!(
        relativize("http://a/b/c/d;p?q#s", FormMask::NONE),
        "http://a/b/c/d;p?q#s"
    );
}

#[test]
fn directory_base() {
    let base = Uri::parse("http://a/b/c/").unwrap();
    assert_eq!(base.relativize("http://a/b/c/", FormMask::ALL).unwrap(), "");
    assert_eq!(
        base.relativize("http://a/b/c/", FormMask::RELATIVE).unwrap(),
        "."
    );
    assert_eq!(base.relativize("http://a/b/c/g", FormMask::ALL).unwrap(), "g");
    assert_eq!(base.relativize("http://a/b/g", FormMask::ALL).unwrap(), "../g");
}

#[test]
fn opaque_base_only_shares_fragments() {
    let base = Uri::parse("urn:isbn:0451450523").unwrap();
    assert_eq!(
        base.relativize("http://a/b", FormMask::ALL).unwrap(),
        "http://a/b"
    );
    assert_eq!(
        base.relativize("urn:isbn:0451450523#p1", FormMask::ALL).unwrap(),
        "urn:isbn:0451450523#p1"
    );
    assert_eq!(
        base.relativize("urn://h/x", FormMask::ALL).unwrap(),
        "urn://h/x"
    );
}

#[test]
fn reference_resolves_back_to_target() {
    let base = Uri::parse(BASE).unwrap();
    for bits in 0..64 {
        let flags = FormMask::from_bits_truncate(bits);
        for target in [
            "http://a/b/c/d;p?q#s",
            "http://a/b/c/g?y",
            "http://a/b/c/",
            "http://a/b/",
            "http://a/b/x/y",
            "http://a/",
            "http://a/x#f",
            "http://b:81/g",
            "http://a/b/c//x",
            "http://a/b/c/ab:c",
            "http://a/b/ab:c/g",
        ] {
            let reference = base.relativize(target, flags).unwrap();
            let resolved = base.resolve(&reference).unwrap();
            assert_eq!(resolved.as_str(), target, "flags {flags}, reference {reference:?}");
        }
    }
}
