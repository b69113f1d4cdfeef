//! Shared record types for the extraction and scoring pipeline.

/// The pair of reference strings a candidate is matched against.
///
/// `primary_text` is the most specific label known so far (typically the
/// title discovered at the primary site); `fallback_text` is the original
/// user-typed query. Either may clean down to an empty string, in which case
/// it contributes no match signal.
#[derive(Debug, Clone)]
pub struct Query {
    pub primary_text: String,
    pub fallback_text: String,
}

impl Query {
    #[must_use]
    pub fn new(primary_text: impl Into<String>, fallback_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            fallback_text: fallback_text.into(),
        }
    }

    /// A query where both reference strings are the same text, used for the
    /// primary lookup before any catalog title is known.
    #[must_use]
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            primary_text: text.clone(),
            fallback_text: text,
        }
    }
}

/// A raw product record as emitted by a catalog source, before scoring.
///
/// `link` is the deduplication identity: two candidates with the same link
/// are the same product and only the first encountered is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Display title as rendered by the catalog.
    pub title: String,
    /// Absolute product URL.
    pub link: String,
    /// Numeric price, absent when the markup carried none.
    pub price: Option<f64>,
    /// Catalog SKU ("артикул"); only the primary site exposes one.
    pub article: Option<String>,
}

/// A [`Candidate`] that cleared the relevance ladder. Lower score is better.
///
/// Scores are only comparable within one source's run — sources accumulate
/// them under different extraction rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}
