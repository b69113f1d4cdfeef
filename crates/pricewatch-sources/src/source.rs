use async_trait::async_trait;

use pricewatch_core::Candidate;

use crate::error::SourceError;

/// A catalog that can be asked for raw product candidates.
///
/// One implementation per site. Adapters perform the network I/O and field
/// extraction only; relevance scoring, deduplication and truncation happen
/// uniformly downstream.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Display name of the catalog, used in logs and the rendered report.
    fn name(&self) -> &'static str;

    /// Fetches zero or more raw candidates for one query.
    ///
    /// `reference_title` is the product title discovered at the primary
    /// site; `user_query` is the original user text. Each adapter uses
    /// whichever its endpoint needs (search endpoints take the user query,
    /// full-catalog APIs ignore both).
    ///
    /// Empty results are `Ok(vec![])`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] only for fetch-level failures: network,
    /// non-2xx status, or an unparseable API payload.
    async fn fetch_candidates(
        &self,
        reference_title: &str,
        user_query: &str,
    ) -> Result<Vec<Candidate>, SourceError>;
}
