// src/lib.rs
use anyhow::Result;

pub mod campaign;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod language;
pub mod linkedin;
pub mod sink;
pub mod types;
pub mod utils;

pub use campaign::{Campaign, CampaignReport};
pub use config::ScraperConfig;
pub use types::{JobRecord, SearchQuery, TimeFilter};

use crawler::{CrawlSettings, JobCrawler};
use language::WhatlangDetector;
use linkedin::{DetailExtractor, Endpoints, MatchFilter, ReqwestTransport, RetryingFetcher, TokioSleeper};
use sink::CsvSink;

pub type LiveCampaign = Campaign<ReqwestTransport, TokioSleeper, WhatlangDetector, CsvSink>;

/// Wire the production collaborators together from a validated config
pub fn build_campaign(config: &ScraperConfig) -> Result<LiveCampaign> {
    config.validate()?;

    let fetcher = RetryingFetcher::new(
        ReqwestTransport::from_config(config)?,
        TokioSleeper,
        config.rate_limit_wait(),
    );
    let extractor = DetailExtractor::new(
        WhatlangDetector,
        &config.target_language,
        MatchFilter::from_config(config)?,
    );
    let crawler = JobCrawler::new(
        fetcher,
        extractor,
        Endpoints::new(config.parsed_base_url()?),
        CrawlSettings::from_config(config),
    );

    Ok(Campaign::new(
        crawler,
        CsvSink::new(&config.output_path),
        config.queries(),
    ))
}

/// Run the whole campaign described by `config`
pub async fn run_campaign(config: &ScraperConfig) -> Result<CampaignReport> {
    let mut campaign = build_campaign(config)?;
    campaign.run().await
}
