//! The relevance tier ladder.
//!
//! A candidate's score is the lowest tier floor it reaches plus a small
//! length penalty, so exact matches beat substring matches, substring matches
//! beat all-tokens matches, and within one tier shorter (more specific)
//! titles rank first. A candidate that reaches no tier at all is excluded,
//! not scored.

/// Added per character of the cleaned candidate title as a tie-break within
/// a tier. Small enough that it can never promote a candidate across tiers
/// for any realistic title length.
const LENGTH_WEIGHT: f64 = 0.01;

/// Scores `clean_title` against the cleaned query pair.
///
/// All inputs must already be cleaned (normalized + brand-stripped), except
/// `article` which is normalized only — catalog SKUs never carry the brand
/// token. Tiers whose reference string is empty are skipped. The floor is
/// the minimum over all matching tiers:
///
/// | floor | condition |
/// |-------|-----------|
/// | 0.0   | article equals cleaned fallback query |
/// | 0.5   | article equals cleaned primary query |
/// | 1.0   | title equals cleaned primary query |
/// | 2.0   | title equals cleaned fallback query |
/// | 3.0   | cleaned primary query is a substring of the title |
/// | 4.0   | cleaned fallback query is a substring of the title |
/// | 5.0   | every token of the cleaned primary query appears in the title |
/// | 6.0   | every token of the cleaned fallback query appears in the title |
///
/// Returns `None` when no tier matches — the caller must drop the candidate.
#[must_use]
pub fn relevance_score(
    clean_title: &str,
    clean_primary: &str,
    clean_fallback: &str,
    article: Option<&str>,
) -> Option<f64> {
    let mut floor = f64::INFINITY;

    if let Some(article) = article.filter(|a| !a.is_empty()) {
        if !clean_fallback.is_empty() && article == clean_fallback {
            floor = floor.min(0.0);
        }
        if !clean_primary.is_empty() && article == clean_primary {
            floor = floor.min(0.5);
        }
    }

    if !clean_primary.is_empty() {
        if clean_title == clean_primary {
            floor = floor.min(1.0);
        }
        if clean_title.contains(clean_primary) {
            floor = floor.min(3.0);
        }
        if all_tokens_present(clean_primary, clean_title) {
            floor = floor.min(5.0);
        }
    }

    if !clean_fallback.is_empty() {
        if clean_title == clean_fallback {
            floor = floor.min(2.0);
        }
        if clean_title.contains(clean_fallback) {
            floor = floor.min(4.0);
        }
        if all_tokens_present(clean_fallback, clean_title) {
            floor = floor.min(6.0);
        }
    }

    if floor.is_infinite() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let penalty = LENGTH_WEIGHT * clean_title.chars().count() as f64;
    Some(floor + penalty)
}

fn all_tokens_present(query: &str, title: &str) -> bool {
    query.split_whitespace().all(|token| title.contains(token))
}
