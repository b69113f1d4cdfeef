//! Shared HTTP client for every catalog adapter.
//!
//! One `reqwest::Client` built per process with the configured timeout and a
//! browser-profile User-Agent, cloned into each adapter. No retries: a failed
//! fetch is final for the request and the user simply re-queries.

use std::time::Duration;

use reqwest::header;

use crate::error::SourceError;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Builds the client with a total request timeout, a 10s connect
    /// timeout, and the given User-Agent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g. invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GET with an HTML browsing header profile; returns the body on 2xx.
    ///
    /// # Errors
    ///
    /// [`SourceError::UnexpectedStatus`] on any non-2xx status,
    /// [`SourceError::Http`] on network or timeout failure.
    pub async fn get_html(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
            .send()
            .await?;
        Self::read_body(url, response).await
    }

    /// GET with an XHR header profile against a storefront API: JSON Accept,
    /// `X-Requested-With`, and the storefront origin as Referer/Origin
    /// (the Tilda API rejects requests without them).
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::get_html`].
    pub async fn get_api_text(&self, url: &str, storefront: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json, text/javascript, */*; q=0.01")
            .header(header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
            .header(header::REFERER, format!("{storefront}/"))
            .header(header::ORIGIN, storefront)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;
        Self::read_body(url, response).await
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, SourceError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "request failed");
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
