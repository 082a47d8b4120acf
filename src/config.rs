// src/config.rs
use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::types::{SearchQuery, TimeFilter};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for one campaign run. Built once and handed to the orchestrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub titles: Vec<String>,
    pub location: String,
    pub time_filter: TimeFilter,
    pub max_jobs_to_scrape: u32,
    pub jobs_per_page: u32,
    pub output_path: PathBuf,
    pub target_language: String,
    pub keyword_term: String,
    pub currency_keyword: String,
    pub gross_keyword: String,
    pub listing_retries: u32,
    pub detail_retries: u32,
    pub rate_limit_wait_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub detail_concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.linkedin.com".to_string(),
            titles: vec![
                "developer".to_string(),
                "programador".to_string(),
                "python".to_string(),
            ],
            location: "Spain".to_string(),
            time_filter: TimeFilter::LastDay,
            max_jobs_to_scrape: 300,
            jobs_per_page: 10,
            output_path: PathBuf::from("jobs.csv"),
            target_language: "es".to_string(),
            keyword_term: "python".to_string(),
            currency_keyword: "euros".to_string(),
            gross_keyword: "brutos".to_string(),
            listing_retries: 5,
            detail_retries: 3,
            rate_limit_wait_secs: 10,
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            detail_concurrency: 1,
        }
    }
}

impl ScraperConfig {
    /// Compiled-in defaults, overlaid with a YAML file when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading scraper configuration from {}", path.display());
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Invalid YAML configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jobs_per_page == 0 {
            anyhow::bail!("jobs_per_page must be greater than zero");
        }
        if self.titles.is_empty() {
            anyhow::bail!("At least one title is required");
        }
        if self.titles.iter().any(|t| t.trim().is_empty()) {
            anyhow::bail!("Title terms must not be blank");
        }
        if self.detail_concurrency == 0 {
            anyhow::bail!("detail_concurrency must be at least 1");
        }
        if self.listing_retries == 0 || self.detail_retries == 0 {
            anyhow::bail!("Retry counts must be at least 1");
        }
        self.parsed_base_url()?;
        Ok(())
    }

    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;
        if url.cannot_be_a_base() {
            anyhow::bail!("base_url cannot be used as a base: {}", self.base_url);
        }
        Ok(url)
    }

    pub fn max_pages(&self) -> u32 {
        self.max_jobs_to_scrape / self.jobs_per_page
    }

    pub fn rate_limit_wait(&self) -> Duration {
        Duration::from_secs(self.rate_limit_wait_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// One query per title, in title order
    pub fn queries(&self) -> Vec<SearchQuery> {
        let max_pages = self.max_pages();
        self.titles
            .iter()
            .map(|title| SearchQuery {
                title: title.clone(),
                location: self.location.clone(),
                time_filter: self.time_filter,
                page_size: self.jobs_per_page,
                max_pages,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.max_pages(), 30);
        assert_eq!(config.titles, vec!["developer", "programador", "python"]);
        assert_eq!(config.rate_limit_wait(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_pages_rounds_down() {
        let config = ScraperConfig {
            max_jobs_to_scrape: 25,
            jobs_per_page: 10,
            ..Default::default()
        };
        assert_eq!(config.max_pages(), 2);
    }

    #[test]
    fn test_queries_share_settings() {
        let config = ScraperConfig::default();
        let queries = config.queries();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0].title, "developer");
        assert_eq!(queries[2].title, "python");
        assert!(queries.iter().all(|q| q.location == "Spain"
            && q.page_size == 10
            && q.max_pages == 30
            && q.time_filter == TimeFilter::LastDay));
    }

    #[test]
    fn test_yaml_overlay_keeps_defaults() {
        let yaml = "location: Portugal\ntime_filter: last_week\ntitles: [rust]\n";
        let config = ScraperConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.location, "Portugal");
        assert_eq!(config.time_filter, TimeFilter::LastWeek);
        assert_eq!(config.titles, vec!["rust"]);
        assert_eq!(config.jobs_per_page, 10);
        assert_eq!(config.target_language, "es");
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = ScraperConfig::from_yaml(include_str!("../config.example.yaml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.titles, ScraperConfig::default().titles);
        assert_eq!(config.max_pages(), 30);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_page = ScraperConfig {
            jobs_per_page: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let blank_title = ScraperConfig {
            titles: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(blank_title.validate().is_err());

        let bad_url = ScraperConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }
}
