//! Canonical key derivation for views and project names.
//!
//! Folder names and config entries referring to the same view have drifted
//! across tools over the years: micro sign vs. Greek mu, stray whitespace,
//! mixed case. Every cross-component lookup goes through [`canonicalize`],
//! so the pipeline never relies on raw string equality.

use crate::config::ViewConfig;

/// Legacy symbol variants folded to a single representative form.
///
/// Maps characters that render identically (or nearly so) but carry
/// distinct code points. Targets are chosen so that a second pass through
/// the fold is a no-op.
const SYMBOL_FOLDS: &[(char, char)] = &[
    ('\u{00B5}', '\u{03BC}'), // MICRO SIGN -> GREEK SMALL LETTER MU
    ('\u{2126}', '\u{03C9}'), // OHM SIGN -> GREEK SMALL LETTER OMEGA
    ('\u{212B}', '\u{00E5}'), // ANGSTROM SIGN -> LATIN SMALL LETTER A WITH RING
    ('\u{2212}', '-'),        // MINUS SIGN -> HYPHEN-MINUS
];

/// Normalize a raw identifier into its canonical lookup form.
///
/// Folds known legacy symbol variants, lowercases, trims, and collapses
/// internal whitespace runs to a single space. Total function: unrecognized
/// input comes back as a best-effort normalized copy, never an error.
/// Idempotent: `canonicalize(canonicalize(x)) == canonicalize(x)`.
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        let folded = SYMBOL_FOLDS
            .iter()
            .find(|(from, _)| *from == ch)
            .map(|(_, to)| *to)
            .unwrap_or(ch);
        out.extend(folded.to_lowercase());
    }
    out
}

/// Derive the canonical lookup key for a view.
///
/// The key is built from the view's identifying attributes (name, plus the
/// variant when present) and passed through [`canonicalize`], so it is
/// always comparable with keys built from raw project base names. Stable
/// across process runs for identical input.
pub fn build_view_key(view: &ViewConfig) -> String {
    let mut key = view.name.clone();
    if let Some(variant) = &view.variant {
        key.push('_');
        key.push_str(variant);
    }
    canonicalize(&key)
}

#[cfg(test)]
mod tests;
