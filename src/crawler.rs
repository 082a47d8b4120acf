// src/crawler.rs
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::language::LanguageDetector;
use crate::linkedin::{extract_listings, DetailExtractor, Endpoints, HttpTransport, RetryingFetcher, Sleeper};
use crate::types::{JobRecord, ListingReference, SearchQuery};

#[derive(Debug, Clone, Copy)]
pub struct CrawlSettings {
    pub listing_retries: u32,
    pub detail_retries: u32,
    pub detail_concurrency: usize,
}

impl CrawlSettings {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            listing_retries: config.listing_retries,
            detail_retries: config.detail_retries,
            detail_concurrency: config.detail_concurrency.max(1),
        }
    }
}

/// Walks the search pages of one query and collects the matching jobs.
pub struct JobCrawler<T, S, L> {
    fetcher: RetryingFetcher<T, S>,
    extractor: DetailExtractor<L>,
    endpoints: Endpoints,
    settings: CrawlSettings,
}

impl<T, S, L> JobCrawler<T, S, L>
where
    T: HttpTransport,
    S: Sleeper,
    L: LanguageDetector,
{
    pub fn new(
        fetcher: RetryingFetcher<T, S>,
        extractor: DetailExtractor<L>,
        endpoints: Endpoints,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            endpoints,
            settings,
        }
    }

    /// Stops early on the first page that has no list items; failed pages are skipped.
    pub async fn run_query(&self, query: &SearchQuery) -> Vec<JobRecord> {
        let mut records = Vec::new();

        for page_index in 0..query.max_pages {
            let page_number = page_index + 1;
            info!("Scraping page {} for title: {}", page_number, query.title);

            let url = self.endpoints.search_url(query, page_index);
            let response = match self.fetcher.fetch(&url, self.settings.listing_retries).await {
                Ok(response) => response,
                Err(err) => {
                    warn!("Could not load page {}, skipping it: {}", page_number, err);
                    continue;
                }
            };

            let page = extract_listings(&response.body);
            if page.is_exhausted() {
                info!(
                    "No jobs on page {}, done with title: {}",
                    page_number, query.title
                );
                break;
            }

            let matched = self.scrape_listings(page.listings, &query.title).await;
            info!("Found {} jobs on page {}", matched.len(), page_number);
            records.extend(matched);
        }

        records
    }

    async fn scrape_listings(&self, listings: Vec<ListingReference>, title: &str) -> Vec<JobRecord> {
        stream::iter(listings)
            .map(|listing| self.scrape_listing(listing, title))
            .buffered(self.settings.detail_concurrency)
            .filter_map(|record| async move { record })
            .collect::<Vec<_>>()
            .await
    }

    async fn scrape_listing(&self, listing: ListingReference, title: &str) -> Option<JobRecord> {
        let url = self.endpoints.detail_url(&listing.job_id);
        match self.fetcher.fetch(&url, self.settings.detail_retries).await {
            Ok(response) => self
                .extractor
                .extract_and_match(&listing, &response.body, title),
            Err(err) => {
                warn!("Skipping job {}: {}", listing.job_id, err);
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use crate::linkedin::fetcher::testing::FakeTransport;
    use std::sync::Arc;

    const SALARY: &str = "Salario 35k euros brutos";
    const NO_SIGNAL: &str = "Buen ambiente de trabajo";

    fn ids(records: &[crate::types::JobRecord]) -> Vec<String> {
        records.iter().map(|r| r.job_id.clone()).collect()
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 30);
        serve_pages(&transport, &query, &[&["1", "2"]]);
        serve_detail(&transport, "1", SALARY);
        serve_detail(&transport, "2", NO_SIGNAL);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["1"]);
        assert_eq!(records[0].job_title.as_deref(), Some("Job 1"));

        let endpoints = endpoints();
        assert_eq!(transport.request_count(&endpoints.search_url(&query, 1)), 1);
        assert_eq!(transport.request_count(&endpoints.search_url(&query, 2)), 0);
    }

    #[tokio::test]
    async fn test_respects_page_bound() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 2);
        serve_pages(&transport, &query, &[&["1"], &["2"], &["3"]]);
        for id in ["1", "2", "3"] {
            serve_detail(&transport, id, SALARY);
        }

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["1", "2"]);
        assert_eq!(
            transport.request_count(&endpoints().search_url(&query, 2)),
            0
        );
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped_not_fatal() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 3);
        let endpoints = endpoints();
        transport.respond(&endpoints.search_url(&query, 0), 503, "");
        transport.respond(&endpoints.search_url(&query, 1), 200, &listing_page(&["5"]));
        transport.respond(&endpoints.search_url(&query, 2), 200, "");
        serve_detail(&transport, "5", SALARY);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["5"]);
        assert_eq!(transport.request_count(&endpoints.search_url(&query, 2)), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_page_is_skipped_after_retries() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 3);
        let endpoints = endpoints();
        transport.respond(&endpoints.search_url(&query, 0), 429, "");
        transport.respond(&endpoints.search_url(&query, 1), 200, &listing_page(&["6"]));
        transport.respond(&endpoints.search_url(&query, 2), 200, "");
        serve_detail(&transport, "6", SALARY);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["6"]);
        assert_eq!(transport.request_count(&endpoints.search_url(&query, 0)), 5);
        assert_eq!(transport.request_count(&endpoints.search_url(&query, 1)), 1);
    }

    #[tokio::test]
    async fn test_failed_detail_is_skipped() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 5);
        serve_pages(&transport, &query, &[&["1", "2", "3"]]);
        serve_detail(&transport, "1", SALARY);
        transport.respond(&endpoints().detail_url("2"), 429, "");
        serve_detail(&transport, "3", SALARY);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["1", "3"]);
        assert_eq!(transport.request_count(&endpoints().detail_url("2")), 3);
    }

    #[tokio::test]
    async fn test_page_of_only_malformed_items_does_not_stop() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 3);
        let endpoints = endpoints();
        transport.respond(
            &endpoints.search_url(&query, 0),
            200,
            "<li><div class=\"ad\"></div></li>",
        );
        transport.respond(&endpoints.search_url(&query, 1), 200, &listing_page(&["8"]));
        transport.respond(&endpoints.search_url(&query, 2), 200, "");
        serve_detail(&transport, "8", SALARY);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["8"]);
    }

    #[tokio::test]
    async fn test_keyword_term_uses_keyword_policy() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("python", 5);
        serve_pages(&transport, &query, &[&["1", "2"]]);
        serve_detail(&transport, "1", "Proyecto en Python y Django");
        serve_detail(&transport, "2", SALARY);

        let records = crawler(&transport, 1).run_query(&query).await;
        assert_eq!(ids(&records), vec!["1"]);
    }

    #[tokio::test]
    async fn test_concurrent_details_keep_listing_order() {
        let transport = Arc::new(FakeTransport::default());
        let query = query("developer", 5);
        serve_pages(&transport, &query, &[&["1", "2", "3", "4"]]);
        for id in ["1", "2", "3", "4"] {
            serve_detail(&transport, id, SALARY);
        }

        let records = crawler(&transport, 3).run_query(&query).await;
        assert_eq!(ids(&records), vec!["1", "2", "3", "4"]);
    }
}
