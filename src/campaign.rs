// src/campaign.rs
use anyhow::Result;
use tracing::info;

use crate::crawler::JobCrawler;
use crate::language::LanguageDetector;
use crate::linkedin::{HttpTransport, Sleeper};
use crate::sink::JobSink;
use crate::types::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub title: String,
    pub persisted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignReport {
    pub queries: Vec<QueryReport>,
}

impl CampaignReport {
    pub fn total_persisted(&self) -> usize {
        self.queries.iter().map(|q| q.persisted).sum()
    }
}

/// Runs every query in order, persisting each one's matches as soon as it finishes.
pub struct Campaign<T, S, L, K> {
    crawler: JobCrawler<T, S, L>,
    sink: K,
    queries: Vec<SearchQuery>,
}

impl<T, S, L, K> Campaign<T, S, L, K>
where
    T: HttpTransport,
    S: Sleeper,
    L: LanguageDetector,
    K: JobSink,
{
    pub fn new(crawler: JobCrawler<T, S, L>, sink: K, queries: Vec<SearchQuery>) -> Self {
        Self {
            crawler,
            sink,
            queries,
        }
    }

    /// Clears the sink, then crawls each query. Only sink failures abort the run.
    pub async fn run(&mut self) -> Result<CampaignReport> {
        self.sink.reset()?;

        let mut report = CampaignReport::default();
        for query in &self.queries {
            info!("Starting search for title: {}", query.title);
            let records = self.crawler.run_query(query).await;
            let persisted = self.sink.persist(&records)?;
            info!("{} new jobs added for title: {}", persisted, query.title);

            report.queries.push(QueryReport {
                title: query.title.clone(),
                persisted,
            });
        }

        Ok(report)
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &K {
        &self.sink
    }
}
