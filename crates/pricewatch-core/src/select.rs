//! Deduplication, scoring and top-K selection over one source's candidates.

use crate::normalize::{normalize, BrandFilter};
use crate::score::relevance_score;
use crate::types::{Candidate, Query, ScoredCandidate};

use std::collections::HashSet;

/// How many results one site contributes to the report.
pub const RESULT_LIMIT: usize = 3;

/// Runs the scoring pipeline over raw candidates from a single source.
///
/// Candidates are processed in source order: the first occurrence of a link
/// wins, later duplicates are skipped. Candidates without a price, and
/// candidates that reach no relevance tier, are dropped. Survivors are
/// stable-sorted ascending by score and truncated to `limit`.
///
/// An empty result is a normal outcome, never an error.
#[must_use]
pub fn select_top(
    candidates: Vec<Candidate>,
    query: &Query,
    brand: &BrandFilter,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let clean_primary = brand.clean(&query.primary_text);
    let clean_fallback = brand.clean(&query.fallback_text);

    if clean_primary.is_empty() && clean_fallback.is_empty() {
        tracing::warn!("both reference strings are empty after cleanup; nothing to match");
        return Vec::new();
    }

    let mut seen_links: HashSet<String> = HashSet::new();
    let mut scored: Vec<ScoredCandidate> = Vec::new();

    for candidate in candidates {
        if !seen_links.insert(candidate.link.clone()) {
            tracing::debug!(link = %candidate.link, "skipping duplicate link");
            continue;
        }
        if candidate.price.is_none() {
            tracing::debug!(title = %candidate.title, "skipping candidate without a price");
            continue;
        }

        let clean_title = brand.clean(&candidate.title);
        let article = candidate.article.as_deref().map(normalize);

        match relevance_score(
            &clean_title,
            &clean_primary,
            &clean_fallback,
            article.as_deref(),
        ) {
            Some(score) => {
                tracing::debug!(title = %candidate.title, score, "candidate matched");
                scored.push(ScoredCandidate { candidate, score });
            }
            None => {
                tracing::debug!(title = %candidate.title, "candidate matched no tier");
            }
        }
    }

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored.truncate(limit);
    scored
}
