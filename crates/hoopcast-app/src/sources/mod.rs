// Concrete data sources for the projection pipeline.

pub mod files;
pub mod http;

use std::time::Duration;

use hoopcast_core::sources::InjurySource;
use hoopcast_core::SimulationError;

use crate::config::Config;

pub use files::{CsvInjurySource, CsvRosterSource, CsvSeasonStats};
pub use http::HttpInjurySource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: ::csv::Error },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no injury source configured")]
    NotConfigured,
}

impl From<SourceError> for SimulationError {
    fn from(e: SourceError) -> Self {
        let source_name = match &e {
            SourceError::Io { path, .. } | SourceError::Csv { path, .. } => path.clone(),
            SourceError::Http(_) => "http".to_string(),
            SourceError::NotConfigured => "injuries".to_string(),
        };
        SimulationError::data_source(source_name, e)
    }
}

/// Build the injury source named by the config (`injuries.path` or
/// `injuries.url`).
pub fn injury_source(config: &Config) -> Result<Box<dyn InjurySource>, SourceError> {
    match (&config.injuries.path, &config.injuries.url) {
        (_, Some(url)) => Ok(Box::new(HttpInjurySource::new(
            url.clone(),
            Duration::from_secs(config.injuries.timeout_secs),
        )?)),
        (Some(path), None) => Ok(Box::new(CsvInjurySource::new(config.resolve(path)))),
        (None, None) => Err(SourceError::NotConfigured),
    }
}
