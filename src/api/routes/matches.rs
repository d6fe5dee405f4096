use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::routes::LimitParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{recent_results, upcoming_matches};
use crate::models::{Match, TeamId};
use crate::source::Dataset;

const DEFAULT_LIMIT: usize = 10;

/// A match with both team names resolved for display.
#[derive(Debug, Serialize)]
pub struct MatchSummary {
    #[serde(flatten)]
    pub game: Match,
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchSummary>,
}

fn summarize(dataset: &Dataset, matches: Vec<&Match>) -> Vec<MatchSummary> {
    let name = |id: &Option<TeamId>| {
        id.as_ref()
            .and_then(|id| dataset.team(id))
            .map(|t| t.name.clone())
    };

    matches
        .into_iter()
        .map(|m| MatchSummary {
            team_a_name: name(&m.team_a_id),
            team_b_name: name(&m.team_b_id),
            game: m.clone(),
        })
        .collect()
}

pub async fn upcoming(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let dataset = state.dataset().await?;

    let mut matches = upcoming_matches(&dataset.matches, Utc::now());
    matches.truncate(params.limit.unwrap_or(DEFAULT_LIMIT));

    Ok(Json(MatchListResponse {
        matches: summarize(&dataset, matches),
    }))
}

pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let dataset = state.dataset().await?;
    let matches = recent_results(&dataset.matches, params.limit.unwrap_or(DEFAULT_LIMIT));

    Ok(Json(MatchListResponse {
        matches: summarize(&dataset, matches),
    }))
}
