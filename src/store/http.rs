//! Record store backed by the municipality HTTP API
//!
//! Two routes are used: `GET {base}/municipalities` returning an array of
//! rows and `GET {base}/municipalities/{id}` returning one row. A 404 on the
//! single-record route means the id does not exist.

use reqwest::{Client, StatusCode, Url};

use crate::config::DashboardConfig;
use crate::error::{KommunError, Result};
use crate::models::{MunicipalityRecord, RawMunicipality, ingest_records};
use crate::store::{RecordStore, StoreFuture, log_ingest};

const COLLECTION: &str = "municipalities";

/// Store querying the HTTP API
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: Url,
    strict: bool,
}

impl HttpRecordStore {
    /// Create a store for the API at `base_url`, using the configured timeout
    pub fn new(base_url: impl Into<String>, config: &DashboardConfig) -> Result<Self> {
        let raw = base_url.into();
        let base_url = Url::parse(&raw)
            .map_err(|e| KommunError::Config(format!("Invalid record store URL '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(KommunError::Config(format!(
                "Record store URL '{raw}' cannot have paths appended"
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("kommundata/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            strict: config.strict_validation,
        })
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// URL for `segments` appended to the base URL, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                KommunError::Config(format!("Cannot append paths to {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_all(&self) -> Result<Vec<MunicipalityRecord>> {
        let url = self.endpoint(&[COLLECTION])?;
        log::debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KommunError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let rows: Vec<RawMunicipality> = serde_json::from_str(&body)?;
        let (records, report) = ingest_records(rows, self.strict)?;
        log_ingest(&self.describe(), &report);
        Ok(records)
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<MunicipalityRecord>> {
        let url = self.endpoint(&[COLLECTION, id])?;
        log::debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(KommunError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let raw: RawMunicipality = serde_json::from_str(&body)?;
        MunicipalityRecord::try_from(raw).map(Some)
    }
}

impl RecordStore for HttpRecordStore {
    fn list(&self) -> StoreFuture<'_, Vec<MunicipalityRecord>> {
        Box::pin(self.fetch_all())
    }

    fn get<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<MunicipalityRecord>> {
        Box::pin(self.fetch_one(id))
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}
