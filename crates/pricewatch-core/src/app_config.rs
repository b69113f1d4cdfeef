//! Process configuration, built from environment variables with defaults.
//!
//! Every knob has a working default so `pricewatch query …` runs with no
//! setup; base URLs are configurable mainly so tests and staging can point
//! sources elsewhere.

use crate::select::RESULT_LIMIT;

/// Default browser-profile User-Agent; the catalogs serve a degraded page to
/// obvious bot agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Total per-request timeout in seconds for every catalog call.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Brand display name; doubles as the stripped token (case-insensitive)
    /// and as the prefix for the decorated primary search.
    pub brand_name: String,
    /// Results kept per site after scoring.
    pub result_limit: usize,
    pub tehnikapremium_base_url: String,
    /// Tilda storefront API origin serving the mieles.ru product list.
    pub mieles_api_base_url: String,
    /// Storefront origin sent as Referer/Origin to the Tilda API.
    pub mieles_referer: String,
    pub hausdorf_base_url: String,
    pub miele_unique_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            brand_name: "Miele".to_owned(),
            result_limit: RESULT_LIMIT,
            tehnikapremium_base_url: "https://tehnikapremium.ru".to_owned(),
            mieles_api_base_url: "https://store.tildaapi.com".to_owned(),
            mieles_referer: "https://mieles.ru".to_owned(),
            hausdorf_base_url: "https://www.hausdorf.ru".to_owned(),
            miele_unique_base_url: "https://miele-unique.ru".to_owned(),
        }
    }
}

impl AppConfig {
    /// Builds a config from `PRICEWATCH_*` environment variables, falling
    /// back to defaults for anything unset. Unparseable numeric values are
    /// logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("PRICEWATCH_REQUEST_TIMEOUT_SECS") {
            match value.parse() {
                Ok(secs) => config.request_timeout_secs = secs,
                Err(_) => {
                    tracing::warn!(value, "PRICEWATCH_REQUEST_TIMEOUT_SECS is not a number");
                }
            }
        }
        if let Ok(value) = std::env::var("PRICEWATCH_RESULT_LIMIT") {
            match value.parse() {
                Ok(limit) => config.result_limit = limit,
                Err(_) => tracing::warn!(value, "PRICEWATCH_RESULT_LIMIT is not a number"),
            }
        }
        for (var, field) in [
            ("PRICEWATCH_USER_AGENT", &mut config.user_agent),
            ("PRICEWATCH_BRAND_NAME", &mut config.brand_name),
            (
                "PRICEWATCH_TEHNIKAPREMIUM_BASE_URL",
                &mut config.tehnikapremium_base_url,
            ),
            ("PRICEWATCH_MIELES_API_BASE_URL", &mut config.mieles_api_base_url),
            ("PRICEWATCH_MIELES_REFERER", &mut config.mieles_referer),
            ("PRICEWATCH_HAUSDORF_BASE_URL", &mut config.hausdorf_base_url),
            (
                "PRICEWATCH_MIELE_UNIQUE_BASE_URL",
                &mut config.miele_unique_base_url,
            ),
        ] {
            if let Ok(value) = std::env::var(var) {
                *field = value;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.result_limit, 3);
        assert_eq!(config.brand_name, "Miele");
        assert!(config.tehnikapremium_base_url.starts_with("https://"));
    }
}
