//! Query and title canonicalization.
//!
//! Every string that participates in relevance matching goes through the same
//! two-step cleanup: [`normalize`] (case fold, letter fold, punctuation strip,
//! whitespace collapse) followed by [`BrandFilter::strip`] (whole-word brand
//! token removal). Order matters: the brand regex relies on a lowercased,
//! whitespace-tamed string.

use regex::Regex;

/// Letter foldings applied after lowercasing. Catalog titles mix `ё` and `е`
/// freely, so both spellings must canonicalize to the same string.
const LETTER_FOLDS: &[(char, char)] = &[('ё', 'е')];

/// Canonicalizes free text for matching: lowercase, fold letter variants,
/// drop every character that is neither alphanumeric nor whitespace
/// (Unicode-aware — Cyrillic letters survive), collapse whitespace runs to a
/// single space, trim.
///
/// Total and idempotent; symbol-only input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    normalize_with(text, LETTER_FOLDS)
}

/// [`normalize`] with a caller-supplied letter-folding table.
#[must_use]
pub fn normalize_with(text: &str, folds: &[(char, char)]) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for mut ch in lowered.chars() {
        if let Some(&(_, to)) = folds.iter().find(|(from, _)| *from == ch) {
            ch = to;
        }
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else if ch.is_whitespace() {
            pending_space = true;
        }
        // Punctuation and symbols are dropped without leaving a space:
        // "WWR880-WPS" and "WWR880WPS" must normalize identically.
    }

    out
}

/// Whole-word, case-insensitive removal of one brand token.
///
/// Compiled once per token; `mielesomething` is not touched because the
/// pattern is anchored on Unicode word boundaries.
#[derive(Debug, Clone)]
pub struct BrandFilter {
    pattern: Regex,
}

impl BrandFilter {
    /// Builds a filter for `token` (e.g. `"Miele"`). Matching is
    /// case-insensitive regardless of the token's spelling.
    #[must_use]
    pub fn new(token: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token)))
            .expect("valid brand token regex");
        Self { pattern }
    }

    /// Removes every whole-word occurrence of the brand token and re-collapses
    /// the whitespace left behind.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        let stripped = self.pattern.replace_all(text, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// The full cleanup applied to every match target:
    /// `strip(normalize(text))`.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        self.strip(&normalize(text))
    }
}
