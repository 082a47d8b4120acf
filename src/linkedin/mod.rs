// src/linkedin/mod.rs
pub mod detail;
pub mod endpoints;
pub mod fetcher;
pub mod listing;
pub mod matcher;

pub use detail::DetailExtractor;
pub use endpoints::Endpoints;
pub use fetcher::{HttpResponse, HttpTransport, ReqwestTransport, RetryingFetcher, Sleeper, TokioSleeper};
pub use listing::extract_listings;
pub use matcher::{MatchFilter, MatchPolicy};
