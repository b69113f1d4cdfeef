//! Per-query orchestration.
//!
//! 1. Validate the query (length only; no I/O before this gate).
//! 2. Check the day cache under the cleaned query key.
//! 3. On a miss, run the primary lookup with the brand-decorated query;
//!    an empty result is replaced by a synthetic stand-in record so the
//!    fan-out always has a reference title. The ResultSet (synthetic
//!    included) is cached.
//! 4. Fan out to all competitor sources concurrently, converting each
//!    branch's failure into a per-site error entry.
//! 5. Merge everything into an [`AggregateReport`].

use std::sync::Arc;

use futures::future::join_all;

use pricewatch_core::{normalize, select_top, BrandFilter, Candidate, Query, ScoredCandidate};
use pricewatch_sources::CandidateSource;

use crate::cache::DayCache;
use crate::error::AggregateError;
use crate::report::{AggregateReport, CompetitorOutcome};

/// Minimum query length, in characters, after trimming.
pub const MIN_QUERY_CHARS: usize = 3;

pub struct Aggregator {
    primary: Arc<dyn CandidateSource>,
    competitors: Vec<Arc<dyn CandidateSource>>,
    cache: DayCache,
    brand: BrandFilter,
    brand_name: String,
    result_limit: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new(
        primary: Arc<dyn CandidateSource>,
        competitors: Vec<Arc<dyn CandidateSource>>,
        cache: DayCache,
        brand_name: &str,
        result_limit: usize,
    ) -> Self {
        Self {
            primary,
            competitors,
            cache,
            brand: BrandFilter::new(brand_name),
            brand_name: brand_name.to_owned(),
            result_limit,
        }
    }

    /// Runs the full pipeline for one user query.
    ///
    /// # Errors
    ///
    /// Only [`AggregateError::QueryTooShort`]. Source failures never
    /// surface here: a failed primary fetch degrades to the synthetic
    /// stand-in, and failed competitor branches become error entries in
    /// the report.
    pub async fn handle_query(&self, user_text: &str) -> Result<AggregateReport, AggregateError> {
        let query = user_text.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(AggregateError::QueryTooShort {
                min: MIN_QUERY_CHARS,
            });
        }

        let cache_key = self.brand.clean(query);

        let primary = match self.cache.get(&cache_key).and_then(|r| r.first().cloned()) {
            Some(hit) => {
                tracing::info!(site = self.primary.name(), query, "primary result served from cache");
                hit
            }
            None => {
                let mut results = self.primary_lookup(query).await;
                if results.is_empty() {
                    tracing::warn!(query, "primary source found nothing; using stand-in record");
                    results.push(stand_in(query));
                }
                self.cache.insert(cache_key, results.clone());
                results[0].clone()
            }
        };

        let reference_title = primary.candidate.title.clone();
        let competitor_query = Query::new(reference_title.clone(), query);

        let lookups = self.competitors.iter().map(|source| {
            let reference_title = reference_title.as_str();
            let competitor_query = &competitor_query;
            async move {
                let name = source.name();
                match source.fetch_candidates(reference_title, query).await {
                    Ok(raw) => {
                        let results =
                            select_top(raw, competitor_query, &self.brand, self.result_limit);
                        if results.is_empty() {
                            tracing::info!(site = name, "no matching products");
                            (name, CompetitorOutcome::NotFound)
                        } else {
                            tracing::info!(site = name, count = results.len(), "matches found");
                            (name, CompetitorOutcome::Found(results))
                        }
                    }
                    Err(e) => {
                        tracing::warn!(site = name, error = %e, "competitor lookup failed");
                        (name, CompetitorOutcome::Error(e.category().to_owned()))
                    }
                }
            }
        });
        let competitors = join_all(lookups).await;

        Ok(AggregateReport {
            primary_site: self.primary.name(),
            primary,
            competitors,
        })
    }

    /// Fetches and scores primary-site candidates for the decorated query.
    /// A fetch failure is logged and degrades to an empty result.
    async fn primary_lookup(&self, query: &str) -> Vec<ScoredCandidate> {
        let decorated = format!("{} {}", self.brand_name, query);
        tracing::info!(site = self.primary.name(), query = %decorated, "primary lookup");

        let raw = match self.primary.fetch_candidates(&decorated, &decorated).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(site = self.primary.name(), error = %e, "primary fetch failed");
                Vec::new()
            }
        };

        select_top(raw, &Query::same(decorated), &self.brand, self.result_limit)
    }
}

/// The fallback record cached and reported when the primary site has no
/// match: carries the normalized query as title (brand token retained) so
/// downstream still has a reference string.
fn stand_in(query: &str) -> ScoredCandidate {
    ScoredCandidate {
        candidate: Candidate {
            title: normalize(query),
            link: String::new(),
            price: None,
            article: None,
        },
        score: 0.0,
    }
}
