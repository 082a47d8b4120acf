// src/sink.rs
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;

use crate::types::JobRecord;

/// Where matched jobs end up.
pub trait JobSink {
    /// Drop whatever a previous run stored
    fn reset(&mut self) -> Result<()>;

    /// Append `records`, returning how many were written
    fn persist(&mut self, records: &[JobRecord]) -> Result<usize>;
}

/// Appends records to a CSV file, writing the header only when the file is new.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl JobSink for CsvSink {
    fn reset(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
            info!("Removed previous output {}", self.path.display());
        }
        Ok(())
    }

    fn persist(&mut self, records: &[JobRecord]) -> Result<usize> {
        if records.is_empty() {
            info!("No new jobs to add to {}", self.path.display());
            return Ok(0);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file_exists = self.path.is_file();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("Failed to write job {}", record.job_id))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        info!("{} jobs saved to {}", records.len(), self.path.display());
        Ok(records.len())
    }
}
