//! Tests for the key module.

use super::*;

fn view(name: &str, variant: Option<&str>) -> ViewConfig {
    ViewConfig {
        name: name.to_string(),
        variant: variant.map(str::to_string),
        display: None,
    }
}

#[test]
fn canonicalize_is_idempotent() {
    let inputs = [
        "DeskA",
        "  Desk   A ",
        "\u{00B5}-view",
        "\u{03BC}-view",
        "ALPHA",
        "already canonical",
        "",
    ];
    for raw in inputs {
        let once = canonicalize(raw);
        assert_eq!(canonicalize(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn micro_sign_variants_fold_to_one_key() {
    // MICRO SIGN and GREEK SMALL LETTER MU are visually identical.
    assert_eq!(canonicalize("\u{00B5}view"), canonicalize("\u{03BC}view"));
    assert_eq!(canonicalize("\u{00B5}view"), "\u{03BC}view");
}

#[test]
fn case_and_whitespace_are_normalized() {
    assert_eq!(canonicalize("  Desk   A "), "desk a");
    assert_eq!(canonicalize("ALPHA"), "alpha");
    assert_eq!(canonicalize("\talpha\n"), "alpha");
}

#[test]
fn unrecognized_input_passes_through_normalized() {
    assert_eq!(canonicalize("plain-name_01"), "plain-name_01");
}

#[test]
fn view_key_matches_canonicalized_project_base() {
    assert_eq!(build_view_key(&view("DeskA", None)), canonicalize("deska"));
}

#[test]
fn view_key_includes_variant() {
    assert_eq!(build_view_key(&view("DeskA", Some("Night"))), "deska_night");
}

#[test]
fn view_key_is_already_canonical() {
    let key = build_view_key(&view(" Desk \u{00B5} ", None));
    assert_eq!(canonicalize(&key), key);
}
