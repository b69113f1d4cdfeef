//! Catalog candidate sources for the pricewatch aggregator.
//!
//! One adapter per catalog, each implementing [`CandidateSource`]: fetch the
//! site's search page or product API and emit raw [`pricewatch_core::Candidate`]
//! records before any scoring. Site markup coupling is deliberately confined
//! to these adapters; the scoring pipeline consumes their output uniformly.

pub mod client;
pub mod error;
pub mod sites;
pub mod source;

mod html;

pub use client::HttpClient;
pub use error::SourceError;
pub use sites::{Hausdorf, MieleUnique, Mieles, Tehnikapremium};
pub use source::CandidateSource;
