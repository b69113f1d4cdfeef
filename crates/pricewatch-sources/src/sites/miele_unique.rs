//! miele-unique.ru — competitor catalog, HTML search endpoint.
//!
//! Cards carry the `catalog-item` class; the title/link anchor uses class
//! `name` and the price renders inside an `<a class="price">`. Decimal
//! extraction policy.

use async_trait::async_trait;

use pricewatch_core::{extract_price, Candidate, PricePolicy};

use crate::client::HttpClient;
use crate::error::SourceError;
use crate::html::{anchor_with_class, element_inner, encode_query, item_blocks, resolve_link};
use crate::source::CandidateSource;

pub struct MieleUnique {
    http: HttpClient,
    base_url: String,
}

impl MieleUnique {
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/search/?q={}&r=Y", self.base_url, encode_query(query))
    }
}

#[async_trait]
impl CandidateSource for MieleUnique {
    fn name(&self) -> &'static str {
        "Miele-Unique.ru"
    }

    async fn fetch_candidates(
        &self,
        _reference_title: &str,
        user_query: &str,
    ) -> Result<Vec<Candidate>, SourceError> {
        let url = self.search_url(user_query);
        tracing::info!(site = self.name(), %url, "searching catalog");
        let html = self.http.get_html(&url).await?;
        let candidates = parse_listing(&html, &self.base_url);
        tracing::debug!(site = self.name(), count = candidates.len(), "raw candidates extracted");
        Ok(candidates)
    }
}

fn parse_listing(html: &str, base_url: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for block in item_blocks(html, |classes| {
        classes.split_whitespace().any(|c| c == "catalog-item")
    }) {
        let Some((href, title)) = anchor_with_class(block, "name") else {
            continue;
        };
        let Some(link) = resolve_link(&href, base_url) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let price = element_inner(block, "a", "price")
            .and_then(|text| extract_price(&text, PricePolicy::Decimal));

        candidates.push(Candidate {
            title,
            link,
            price,
            article: None,
        });
    }

    candidates
}
