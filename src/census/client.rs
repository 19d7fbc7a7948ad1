//! HTTP client for the Census Reporter APIs.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::CensusApiConfig;
use crate::error::{ApiError, Result};

/// A geographic entity returned by the place-search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Unique geographic identifier, e.g. "16000US1714000"
    pub full_geoid: String,
    /// Display name, e.g. "Chicago, IL"
    pub display_name: String,
    /// Summary level of the geography, when the API provides it
    #[serde(default)]
    pub sumlevel: Option<u32>,
}

/// One geography's row in a survey table: field id to encoded count.
///
/// The API encodes counts as strings; [`parse_count`] also accepts plain
/// JSON numbers.
pub type TableRow = HashMap<String, serde_json::Value>;

/// Survey table data keyed by geoid.
pub type TableData = HashMap<String, TableRow>;

/// Extract an integer count from a table cell.
pub fn parse_count(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Outbound interface to the Census Reporter APIs.
#[async_trait]
pub trait CensusApi: Send + Sync {
    /// Search for geographies whose name starts with `prefix`.
    ///
    /// An empty result is a normal negative outcome, not an error.
    async fn find_places(&self, prefix: &str) -> Result<Vec<Place>>;

    /// Fetch a survey table's rows for a set of geographies.
    async fn fetch_table(&self, table: &str, geoids: &[&str]) -> Result<TableData>;
}

/// Place-search response envelope.
#[derive(Debug, Deserialize)]
struct PlaceSearchResponse {
    results: Vec<Place>,
}

/// `CensusApi` implementation over HTTP.
pub struct HttpCensusClient {
    client: Client,
    base_url: String,
    release: String,
}

impl HttpCensusClient {
    /// Create a client from configuration.
    ///
    /// Every request carries the configured timeout; an elapsed timeout is
    /// reported as [`ApiError::Timeout`], distinct from other transport
    /// failures.
    pub fn from_config(config: &CensusApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            release: config.release.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        tracing::debug!(url, "census API request");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            }
            .into());
        }

        response.json::<T>().await.map_err(|e| {
            ApiError::MalformedPayload {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl CensusApi for HttpCensusClient {
    async fn find_places(&self, prefix: &str) -> Result<Vec<Place>> {
        let url = format!("{}/geo/search", self.base_url);
        let body: PlaceSearchResponse = self.get_json(&url, &[("prefix", prefix)]).await?;
        Ok(body.results)
    }

    async fn fetch_table(&self, table: &str, geoids: &[&str]) -> Result<TableData> {
        let url = format!("{}/{}/{}", self.base_url, self.release, table);
        let geoids = geoids.join(",");
        self.get_json(&url, &[("geoids", &geoids)]).await
    }
}
