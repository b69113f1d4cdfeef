//! tehnikapremium.ru — the primary catalog.
//!
//! Query-parameterized search endpoint returning an HTML listing. The only
//! site that exposes a catalog article ("Артикул"), which is why it serves
//! as the source of truth for the canonical product title. Prices render as
//! whole rubles with group separators — integer extraction policy.

use async_trait::async_trait;

use pricewatch_core::{extract_price, Candidate, PricePolicy};

use crate::client::HttpClient;
use crate::error::SourceError;
use crate::html::{anchor_with_class, element_inner, encode_query, item_blocks, resolve_link};
use crate::source::CandidateSource;

const ARTICLE_LABEL: &str = "Артикул:";

pub struct Tehnikapremium {
    http: HttpClient,
    base_url: String,
}

impl Tehnikapremium {
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/catalog/?q={}&s={}",
            self.base_url,
            encode_query(query),
            encode_query("Найти")
        )
    }
}

#[async_trait]
impl CandidateSource for Tehnikapremium {
    fn name(&self) -> &'static str {
        "TehnikaPremium.ru"
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

/// Extracts raw candidates from a search results page.
///
/// Items carry the `catalog_item` class; items also tagged `hidden` are
/// filler the storefront keeps out of view and are skipped.
fn parse_listing(html: &str, base_url: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for block in item_blocks(html, |classes| {
        let mut is_item = false;
        let mut hidden = false;
        for token in classes.split_whitespace() {
            is_item |= token == "catalog_item";
            hidden |= token == "hidden";
        }
        is_item && !hidden
    }) {
        let Some(title) = element_inner(block, "div", "item-title") else {
            continue;
        };
        let Some((href, _)) = anchor_with_class(block, "dark_link") else {
            continue;
        };
        let Some(link) = resolve_link(&href, base_url) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let article = element_inner(block, "div", "article_block")
            .map(|text| text.trim_start_matches(ARTICLE_LABEL).trim().to_owned())
            .filter(|a| !a.is_empty());
        let price = element_inner(block, "span", "price_value")
            .and_then(|text| extract_price(&text, PricePolicy::Integer));

        candidates.push(Candidate {
            title,
            link,
            price,
            article,
        });
    }

    candidates
}
