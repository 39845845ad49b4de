use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use super::error::FeedError;
use super::types::{Observatory, ProviderResponse};

/// Source of raw satellite positions.
pub trait PositionProvider: Send + Sync {
    fn observatories(&self) -> impl Future<Output = Result<Vec<Observatory>, FeedError>> + Send;

    fn locations(
        &self,
        satellites: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        coordinate_system: &str,
    ) -> impl Future<Output = Result<ProviderResponse, FeedError>> + Send;
}

/// Recorded provider output read from a JSON file on every request.
pub struct FileProvider {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ProviderDocument {
    #[serde(default)]
    observatories: Vec<Observatory>,
    #[serde(flatten)]
    response: ProviderResponse,
}

impl FileProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<ProviderDocument, FeedError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            FeedError::ProviderUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| FeedError::InvalidResponse(e.to_string()))
    }
}

impl PositionProvider for FileProvider {
    async fn observatories(&self) -> Result<Vec<Observatory>, FeedError> {
        Ok(self.load().await?.observatories)
    }

    /// Returns the recorded series of the requested satellites as-is; the time
    /// window is not applied to recordings.
    async fn locations(
        &self,
        satellites: &[String],
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _coordinate_system: &str,
    ) -> Result<ProviderResponse, FeedError> {
        let mut response = self.load().await?.response;
        response
            .data
            .retain(|d| satellites.iter().any(|s| s.eq_ignore_ascii_case(&d.id)));
        Ok(response)
    }
}

/// JSON web service exposing `observatories` and `locations` endpoints.
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ObservatoryList {
    #[serde(rename = "Observatory", default)]
    observatory: Vec<Observatory>,
}

impl HttpProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl PositionProvider for HttpProvider {
    async fn observatories(&self) -> Result<Vec<Observatory>, FeedError> {
        let list: ObservatoryList = self
            .client
            .get(format!("{}/observatories", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(list.observatory)
    }

    async fn locations(
        &self,
        satellites: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        coordinate_system: &str,
    ) -> Result<ProviderResponse, FeedError> {
        let query = [
            ("satellites", satellites.join(",")),
            ("start", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("coords", coordinate_system.to_ascii_lowercase()),
        ];

        log::debug!("GET {}/locations {:?}", self.base_url, query);

        let response = self
            .client
            .get(format!("{}/locations", self.base_url))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

/// Provider selected by configuration.
pub enum AnyProvider {
    File(FileProvider),
    Http(HttpProvider),
}

impl PositionProvider for AnyProvider {
    async fn observatories(&self) -> Result<Vec<Observatory>, FeedError> {
        match self {
            AnyProvider::File(p) => p.observatories().await,
            AnyProvider::Http(p) => p.observatories().await,
        }
    }

    async fn locations(
        &self,
        satellites: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        coordinate_system: &str,
    ) -> Result<ProviderResponse, FeedError> {
        match self {
            AnyProvider::File(p) => p.locations(satellites, start, end, coordinate_system).await,
            AnyProvider::Http(p) => p.locations(satellites, start, end, coordinate_system).await,
        }
    }
}
