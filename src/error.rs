// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("No data fetched from any source")]
    NoData,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Technique lookup failed for '{actor}': {message}")]
    TechniqueLookup { actor: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Selection error: {0}")]
    Selection(String),
}
