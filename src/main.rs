use anyhow::{Context, Result};
use clap::Parser;
use job_scraper::cli::Cli;
use job_scraper::ScraperConfig;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(json_layer)
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = ScraperConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    info!(
        "Running campaign for {:?} in {} ({} pages per title)",
        config.titles,
        config.location,
        config.max_pages()
    );
    info!("Output: {}", config.output_path.display());

    let report = job_scraper::run_campaign(&config).await?;
    for query in &report.queries {
        info!("{}: {} jobs saved", query.title, query.persisted);
    }
    info!(
        "Campaign finished, {} jobs saved to {}",
        report.total_persisted(),
        config.output_path.display()
    );
    Ok(())
}
