use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Short category name rendered in the aggregate report when a
    /// competitor branch fails.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(_) => "Http",
            Self::UnexpectedStatus { .. } => "UnexpectedStatus",
            Self::Deserialize { .. } => "Deserialize",
        }
    }
}
