//! Domain core for the pricewatch aggregator.
//!
//! Pure, I/O-free building blocks shared by every catalog source: text
//! normalization and brand-token stripping, price extraction, the relevance
//! tier ladder, and dedup + top-K selection. Network adapters live in
//! `pricewatch-sources`; orchestration lives in `pricewatch-aggregate`.

pub mod app_config;
pub mod normalize;
pub mod price;
pub mod score;
pub mod select;
pub mod types;

pub use app_config::AppConfig;
pub use normalize::{normalize, BrandFilter};
pub use price::{extract_price, PricePolicy};
pub use score::relevance_score;
pub use select::select_top;
pub use types::{Candidate, Query, ScoredCandidate};
