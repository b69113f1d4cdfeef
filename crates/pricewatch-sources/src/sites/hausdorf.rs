//! hausdorf.ru — competitor catalog, HTML search endpoint.
//!
//! Product cards carry the `catalog-thumb` class; title and link share one
//! anchor, and the rendered price may include kopecks — decimal extraction
//! policy.

use async_trait::async_trait;

use pricewatch_core::{extract_price, Candidate, PricePolicy};

use crate::client::HttpClient;
use crate::error::SourceError;
use crate::html::{anchor_with_class, element_inner, encode_query, item_blocks, resolve_link};
use crate::source::CandidateSource;

pub struct Hausdorf {
    http: HttpClient,
    base_url: String,
}

impl Hausdorf {
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/search/?q={}", self.base_url, encode_query(query))
    }
}

#[async_trait]
impl CandidateSource for Hausdorf {
    fn name(&self) -> &'static str {
        "Hausdorf.ru"
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
        classes.split_whitespace().any(|c| c == "catalog-thumb")
    }) {
        let Some((href, title)) = anchor_with_class(block, "catalog-thumb__titlelink") else {
            continue;
        };
        let Some(link) = resolve_link(&href, base_url) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let price = element_inner(block, "div", "catalog-thumb__price")
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTING: &str = r#"
        <div class="catalog-thumb">
          <a class="catalog-thumb__titlelink" href="/product/cm7/">
            Картридж <span>Miele CM7</span>
          </a>
          <div class="catalog-thumb__price">13 990 ₽</div>
        </div>
        <div class="catalog-thumb">
          <a class="catalog-thumb__titlelink" href="https://www.hausdorf.ru/product/caps/">Капсулы</a>
          <div class="catalog-thumb__price">по запросу</div>
        </div>
    "#;

    #[test]
    fn parse_listing_flattens_nested_title_markup() {
        let candidates = parse_listing(LISTING, "https://www.hausdorf.ru");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Картридж Miele CM7");
        assert_eq!(candidates[0].link, "https://www.hausdorf.ru/product/cm7/");
        assert_eq!(candidates[0].price, Some(13990.0));
    }

    #[test]
    fn parse_listing_absent_price_when_markup_has_no_number() {
        let candidates = parse_listing(LISTING, "https://www.hausdorf.ru");
        assert_eq!(candidates[1].price, None);
    }

    #[tokio::test]
    async fn fetch_candidates_uses_the_user_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/"))
            .and(query_param("q", "CM7"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
            .mount(&server)
            .await;

        let source = Hausdorf::new(HttpClient::new(10, "test-agent").unwrap(), &server.uri());
        let candidates = source
            .fetch_candidates("Картридж Miele CM7", "CM7")
            .await
            .unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
