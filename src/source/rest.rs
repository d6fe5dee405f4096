//! Hosted database source over PostgREST.
//!
//! Each row kind is one `GET {base}/rest/v1/{table}?select=...`. Players embed
//! their team and stats relations, which come back as arrays or single objects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::{RowSource, SourceError};
use crate::normalize::{RawMatchRow, RawPlayerRow, RawTeamRow};

const TEAMS_SELECT: &str = "*";
const MATCHES_SELECT: &str = "*";
const PLAYERS_SELECT: &str = "*,teams(*),player_stats(*)";

pub struct RestSource {
    client: Client,
    base_url: Url,
}

impl RestSource {
    /// Create a client for the project at `base_url`, authenticated with `api_key`.
    pub fn new(base_url: &str, api_key: String, timeout_seconds: u64) -> Result<Self, SourceError> {
        let base_url = parse_base_url(base_url)?;

        let key = HeaderValue::from_str(&api_key).map_err(|_| SourceError::InvalidApiKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| SourceError::InvalidApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// REST endpoint for a table with the given select clause.
    pub fn table_url(&self, table: &str, select: &str) -> Result<Url, SourceError> {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("select", select);
        Ok(url)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
    ) -> Result<Vec<T>, SourceError> {
        let url = self.table_url(table, select)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    body
                },
            });
        }

        let rows: Vec<T> = response.json().await?;
        info!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }
}

/// Parse a project URL so that relative joins keep its full path.
fn parse_base_url(raw: &str) -> Result<Url, SourceError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SourceError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            raw, other
        ))),
    }
}

#[async_trait]
impl RowSource for RestSource {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn teams(&self) -> Result<Vec<RawTeamRow>, SourceError> {
        self.fetch_rows("teams", TEAMS_SELECT).await
    }

    async fn matches(&self) -> Result<Vec<RawMatchRow>, SourceError> {
        self.fetch_rows("matches", MATCHES_SELECT).await
    }

    async fn players(&self) -> Result<Vec<RawPlayerRow>, SourceError> {
        self.fetch_rows("players", PLAYERS_SELECT).await
    }
}
