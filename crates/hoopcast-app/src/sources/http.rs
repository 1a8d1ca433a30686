// Injury feed over HTTP: the body is the same `name,status,date` CSV the
// file source reads.

use std::time::Duration;

use async_trait::async_trait;
use hoopcast_core::injury::RawInjuryRow;
use hoopcast_core::sources::InjurySource;
use hoopcast_core::SimulationError;
use tracing::debug;

use super::files::load_injuries_from_reader;
use super::SourceError;

pub struct HttpInjurySource {
    http: reqwest::Client,
    url: String,
}

impl HttpInjurySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Http)?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub async fn load(&self) -> Result<Vec<RawInjuryRow>, SourceError> {
        debug!("fetching injury feed from {}", self.url);
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        load_injuries_from_reader(body.as_bytes()).map_err(|e| SourceError::Csv {
            path: self.url.clone(),
            source: e,
        })
    }
}

#[async_trait]
impl InjurySource for HttpInjurySource {
    async fn fetch_injuries(&self) -> Result<Vec<RawInjuryRow>, SimulationError> {
        Ok(self.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopcast_core::sources::load_injury_report;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetches_and_parses_feed() {
        let server = MockServer::start_async().await;
        let feed = server
            .mock_async(|when, then| {
                when.method(GET).path("/injuries.csv");
                then.status(200)
                    .header("Content-Type", "text/csv")
                    .body("name,status,date\nKyle Lowry,Out,Jan 4\nJonas Valanciunas,Day-To-Day,Jan 4\n");
            })
            .await;

        let source =
            HttpInjurySource::new(server.url("/injuries.csv"), Duration::from_secs(5)).unwrap();
        let rows = source.fetch_injuries().await.unwrap();

        feed.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Jonas Valanciunas");
    }

    #[tokio::test]
    async fn server_error_fails_open_to_empty_report() {
        let server = MockServer::start_async().await;
        let feed = server
            .mock_async(|when, then| {
                when.method(GET).path("/injuries.csv");
                then.status(503);
            })
            .await;

        let source =
            HttpInjurySource::new(server.url("/injuries.csv"), Duration::from_secs(5)).unwrap();
        assert!(source.fetch_injuries().await.is_err());

        let report = load_injury_report(&source, 2017).await;
        assert!(report.is_empty());
        feed.assert_hits_async(2).await;
    }
}
