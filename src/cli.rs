// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

use crate::config::ScraperConfig;

#[derive(Debug, Parser)]
#[command(name = "job-scraper")]
#[command(about = "Crawl remote job listings and keep the ones with salary signals")]
pub struct Cli {
    /// YAML file overriding the built-in campaign settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV file to write matches to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Search term to run; repeat for several. Replaces the configured titles
    #[arg(long = "title")]
    pub titles: Vec<String>,

    /// Also write JSON logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, config: &mut ScraperConfig) {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if !self.titles.is_empty() {
            config.titles = self.titles.clone();
        }
    }
}
