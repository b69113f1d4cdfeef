//! Aggregation layer: day-scoped result cache, primary lookup, concurrent
//! competitor fan-out, and report rendering.

pub mod cache;
pub mod error;
pub mod pipeline;
pub mod report;

pub use cache::{Clock, DayCache, SystemClock};
pub use error::AggregateError;
pub use pipeline::{Aggregator, MIN_QUERY_CHARS};
pub use report::{format_price, AggregateReport, CompetitorOutcome};
