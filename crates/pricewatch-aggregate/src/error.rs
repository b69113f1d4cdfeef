use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("query too short: at least {min} characters required")]
    QueryTooShort { min: usize },
}
