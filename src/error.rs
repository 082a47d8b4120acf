// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError(format!("request timed out: {}", err))
        } else {
            TransportError(err.to_string())
        }
    }
}

/// Terminal outcome of a fetch that did not produce a 200 response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("still rate limited after {attempts} attempts: {url}")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("list item has no base-card node")]
    MissingBaseCard,

    #[error("base card has no data-entity-urn attribute")]
    MissingIdentifier,

    #[error("malformed entity urn: {0:?}")]
    MalformedIdentifier(String),
}

/// Why a detail page did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("invalid listing: {0}")]
    InvalidListing(#[from] ListingError),

    #[error("no description found")]
    MissingDescription,

    #[error("language of description could not be detected")]
    LanguageUndetected,

    #[error("description language is {detected}, expected {expected}")]
    LanguageMismatch { detected: String, expected: String },

    #[error("description does not match the filter for {title:?}")]
    NoMatch { title: String },
}
