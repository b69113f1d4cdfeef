//! mieles.ru — Tilda storefront, queried through the Tilda product-list API.
//!
//! ## Observed payload shape
//!
//! The endpoint returns `{"products": [...]}` where each product carries
//! `title`, `url` (absolute) and `price`. `price` arrives either as a JSON
//! number or as a decimal string (sometimes with a comma separator), and is
//! occasionally absent — modeled as `Option<f64>` behind a tolerant
//! deserializer. The body is sometimes wrapped in JSONP-style padding; on a
//! parse failure the outermost `{…}` object is retried before giving up.
//!
//! The API serves the full chemistry section in one slice (`size=100`), so
//! neither reference string participates in the request; matching happens
//! entirely downstream.

use async_trait::async_trait;
use serde::Deserialize;

use pricewatch_core::Candidate;

use crate::client::HttpClient;
use crate::error::SourceError;
use crate::html::encode_query;
use crate::source::CandidateSource;

const STORE_PART_UID: &str = "118745354213";
const REC_ID: &str = "501398769";
/// Storefront section filter ("Химия" — the chemistry/detergent section).
const SECTION_FILTER: &str = "Химия";

pub struct Mieles {
    http: HttpClient,
    api_base_url: String,
    storefront: String,
}

impl Mieles {
    /// `api_base_url` is the Tilda API origin; `storefront` is the shop
    /// origin sent as Referer/Origin.
    #[must_use]
    pub fn new(http: HttpClient, api_base_url: &str, storefront: &str) -> Self {
        Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            storefront: storefront.trim_end_matches('/').to_owned(),
        }
    }

    fn products_url(&self) -> String {
        // `c` is a millisecond cache-buster the storefront front end sends.
        let c = chrono::Utc::now().timestamp_millis();
        format!(
            "{}/api/getproductslist/?storepartuid={STORE_PART_UID}&recid={REC_ID}&c={c}\
             &getparts=true&getoptions=true&slice=1&filters%5Bstorepartuid%5D%5B0%5D={}&size=100",
            self.api_base_url,
            encode_query(SECTION_FILTER)
        )
    }
}

#[async_trait]
impl CandidateSource for Mieles {
    fn name(&self) -> &'static str {
        "Mieles.ru"
    }

    async fn fetch_candidates(
        &self,
        _reference_title: &str,
        _user_query: &str,
    ) -> Result<Vec<Candidate>, SourceError> {
        let url = self.products_url();
        tracing::info!(site = self.name(), "fetching product list");
        let body = self.http.get_api_text(&url, &self.storefront).await?;
        let candidates = parse_products(&body, &self.storefront)?;
        tracing::debug!(site = self.name(), count = candidates.len(), "raw candidates extracted");
        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct TildaProductsResponse {
    #[serde(default)]
    products: Vec<TildaProduct>,
}

#[derive(Debug, Deserialize)]
struct TildaProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, deserialize_with = "flexible_price")]
    price: Option<f64>,
}

/// Accepts a number, a decimal string (comma or dot), or null.
fn flexible_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        Some(other) => {
            tracing::debug!(?other, "unexpected price shape from Tilda");
            None
        }
    })
}

fn parse_products(body: &str, context: &str) -> Result<Vec<Candidate>, SourceError> {
    let response = match serde_json::from_str::<TildaProductsResponse>(body) {
        Ok(parsed) => parsed,
        Err(first_err) => match outermost_object(body)
            .map(serde_json::from_str::<TildaProductsResponse>)
        {
            Some(Ok(parsed)) => parsed,
            _ => {
                return Err(SourceError::Deserialize {
                    context: format!("product list from {context}"),
                    source: first_err,
                })
            }
        },
    };

    Ok(response
        .products
        .into_iter()
        .filter_map(into_candidate)
        .collect())
}

/// Slice from the first `{` to the last `}`, for JSONP-padded bodies.
fn outermost_object(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (end > start).then(|| &body[start..=end])
}

fn into_candidate(product: TildaProduct) -> Option<Candidate> {
    let title = product.title.filter(|t| !t.is_empty())?;
    let link = product.url.filter(|u| !u.is_empty())?;
    Some(Candidate {
        title,
        link,
        price: product.price,
        article: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAYLOAD: &str = r#"{
        "total": "3",
        "products": [
            {"title": "Картридж Miele CM7", "url": "https://mieles.ru/tproduct/1", "price": "1500"},
            {"title": "Капсулы Caps", "url": "https://mieles.ru/tproduct/2", "price": 2490.5},
            {"title": "", "url": "https://mieles.ru/tproduct/3", "price": "100"}
        ]
    }"#;

    #[test]
    fn parse_products_reads_string_and_number_prices() {
        let candidates = parse_products(PAYLOAD, "test").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].price, Some(1500.0));
        assert_eq!(candidates[1].price, Some(2490.5));
    }

    #[test]
    fn parse_products_skips_incomplete_records() {
        let candidates = parse_products(PAYLOAD, "test").unwrap();
        assert!(candidates.iter().all(|c| !c.title.is_empty()));
    }

    #[test]
    fn parse_products_unwraps_padded_json() {
        let padded = format!("while(1);{PAYLOAD}");
        let candidates = parse_products(&padded, "test").unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn parse_products_rejects_garbage() {
        let err = parse_products("<html>busy</html>", "test").unwrap_err();
        assert!(matches!(err, SourceError::Deserialize { .. }));
    }

    #[test]
    fn flexible_price_handles_comma_and_null() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "flexible_price")]
            price: Option<f64>,
        }
        let with_comma: Probe = serde_json::from_str(r#"{"price": "1 499,90"}"#).unwrap();
        // Embedded group separator keeps the string unparseable; absent is
        // the safe outcome.
        assert_eq!(with_comma.price, None);

        let comma_only: Probe = serde_json::from_str(r#"{"price": "1499,90"}"#).unwrap();
        assert_eq!(comma_only.price, Some(1499.90));

        let null: Probe = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert_eq!(null.price, None);

        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.price, None);
    }

    #[tokio::test]
    async fn fetch_candidates_sends_storefront_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getproductslist/"))
            .and(query_param("storepartuid", STORE_PART_UID))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAYLOAD))
            .mount(&server)
            .await;

        let source = Mieles::new(
            HttpClient::new(10, "test-agent").unwrap(),
            &server.uri(),
            "https://mieles.ru",
        );
        let candidates = source.fetch_candidates("", "").await.unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
