//! Row sources.
//!
//! Where raw rows come from:
//! - Local: JSONL files in the data directory (default)
//! - Remote: a hosted Postgres database behind a PostgREST endpoint
//!
//! Both hand back raw rows; [`Dataset::load`] runs them through the normalizer.

mod jsonl;
mod rest;

pub use jsonl::JsonlSource;
pub use rest::RestSource;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{Match, PlayerStatLine, Team, TeamId};
use crate::normalize::{
    normalize_matches, normalize_players, normalize_teams, RawMatchRow, RawPlayerRow, RawTeamRow,
};
use crate::storage::{StorageConfig, StorageError};

/// Errors that can occur while fetching rows.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

/// Row source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SourceConfig {
    /// JSONL files under the data directory
    #[serde(rename = "jsonl")]
    Jsonl,

    /// Hosted database REST endpoint
    #[serde(rename = "rest")]
    Rest {
        base_url: String,
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        #[serde(default = "default_timeout")]
        timeout_seconds: u64,
    },
}

fn default_api_key_env() -> String {
    "SUPABASE_ANON_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Jsonl
    }
}

/// Trait for raw row sources.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    async fn teams(&self) -> Result<Vec<RawTeamRow>, SourceError>;

    async fn matches(&self) -> Result<Vec<RawMatchRow>, SourceError>;

    /// Players with their embedded team and stats relations.
    async fn players(&self) -> Result<Vec<RawPlayerRow>, SourceError>;
}

/// Create a row source from configuration.
pub fn create_source(
    config: &SourceConfig,
    storage: &StorageConfig,
) -> Result<Arc<dyn RowSource>, SourceError> {
    match config {
        SourceConfig::Jsonl => Ok(Arc::new(JsonlSource::new(storage.clone()))),
        SourceConfig::Rest {
            base_url,
            api_key_env,
            timeout_seconds,
        } => {
            let api_key = std::env::var(api_key_env)
                .map_err(|_| SourceError::MissingCredentials(api_key_env.clone()))?;
            Ok(Arc::new(RestSource::new(base_url, api_key, *timeout_seconds)?))
        }
    }
}

/// Normalized rows for one request.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub players: Vec<PlayerStatLine>,
}

impl Dataset {
    /// Fetch every row kind concurrently and normalize.
    pub async fn load(source: &dyn RowSource) -> Result<Self, SourceError> {
        let (teams, matches, players) =
            tokio::try_join!(source.teams(), source.matches(), source.players())?;

        info!(
            "Loaded {} teams, {} matches, {} players from {}",
            teams.len(),
            matches.len(),
            players.len(),
            source.name()
        );

        Ok(Self {
            teams: normalize_teams(teams),
            matches: normalize_matches(matches),
            players: normalize_players(players),
        })
    }

    /// Look up a team by ID.
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }
}

/// In-memory source for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MockSource {
    pub teams: Vec<RawTeamRow>,
    pub matches: Vec<RawMatchRow>,
    pub players: Vec<RawPlayerRow>,
    pub fail: bool,
}

#[cfg(test)]
#[async_trait]
impl RowSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn teams(&self) -> Result<Vec<RawTeamRow>, SourceError> {
        if self.fail {
            return Err(SourceError::HttpStatus {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.teams.clone())
    }

    async fn matches(&self) -> Result<Vec<RawMatchRow>, SourceError> {
        Ok(self.matches.clone())
    }

    async fn players(&self) -> Result<Vec<RawPlayerRow>, SourceError> {
        Ok(self.players.clone())
    }
}
