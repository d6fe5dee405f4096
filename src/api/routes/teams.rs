use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::routes::LimitParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    aggregate_record, build_standings, rank_by_ranking_points, team_match_history,
    upcoming_matches,
};
use crate::models::{Match, MatchHistoryEntry, Team, TeamId, TeamRecord, TeamStanding};

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub standings: Vec<TeamStanding>,
}

pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let dataset = state.dataset().await?;

    let mut standings = build_standings(&dataset.teams, &dataset.matches);
    if let Some(limit) = params.limit {
        standings.truncate(limit);
    }

    Ok(Json(StandingsResponse { standings }))
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub teams: Vec<Team>,
}

/// Teams by ranking points, unranked last.
pub async fn rankings(State(state): State<AppState>) -> Result<Json<RankingsResponse>, ApiError> {
    let dataset = state.dataset().await?;
    let teams = rank_by_ranking_points(&dataset.teams)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(RankingsResponse { teams }))
}

#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    pub team: Team,
    pub record: TeamRecord,
    pub win_rate: f64,
    /// 1-based place in the standings
    pub standing: usize,
    pub history: Vec<MatchHistoryEntry>,
    /// Unplayed matches for this team, soonest first
    pub upcoming: Vec<Match>,
}

pub async fn team_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let dataset = state.dataset().await?;
    let id = TeamId::new(id);

    let team = dataset
        .team(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("team {}", id)))?;

    let standing = build_standings(&dataset.teams, &dataset.matches)
        .iter()
        .position(|s| s.team.id == id)
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let upcoming = upcoming_matches(&dataset.matches, Utc::now())
        .into_iter()
        .filter(|m| m.involves(&id))
        .cloned()
        .collect();

    let record = aggregate_record(&id, &dataset.matches);
    Ok(Json(TeamDetailResponse {
        win_rate: record.win_rate(),
        record,
        history: team_match_history(&id, &dataset.matches),
        upcoming,
        standing,
        team,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_support::{empty_app, fixture_app, get_json};
    use axum::http::StatusCode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_standings_order() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        let standings = json["standings"].as_array().unwrap();
        let ids: Vec<&str> = standings.iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["t1", "t3", "t2"]);

        let leader = &standings[0]["record"];
        assert_eq!(leader["wins"], 2);
        assert_eq!(leader["losses"], 0);
        assert_eq!(leader["points_for"], 145);
        assert_eq!(leader["points_against"], 130);
        assert_eq!(leader["points_differential"], 15);
    }

    #[tokio::test]
    async fn test_standings_limit() {
        let dir = TempDir::new().unwrap();
        let (_, json) = get_json(fixture_app(dir.path()), "/api/standings?limit=1").await;

        assert_eq!(json["standings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_standings_empty() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(empty_app(dir.path()), "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["standings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rankings_by_points() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = json["teams"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["t2", "t1", "t3"]);
    }

    #[tokio::test]
    async fn test_team_detail() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/teams/t1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team"]["name"], "Night Owls");
        assert_eq!(json["standing"], 1);
        assert_eq!(json["record"]["games_played"], 2);

        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        // Most recent first
        assert_eq!(history[0]["match_id"], "m2");
        assert_eq!(history[0]["result"], "win");
        assert_eq!(history[1]["opponent_id"], "t2");

        assert_eq!(json["win_rate"], 1.0);
        assert!(json["upcoming"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_team_detail_upcoming() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/teams/t2").await;

        assert_eq!(status, StatusCode::OK);
        let upcoming: Vec<&str> = json["upcoming"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(upcoming, vec!["m3", "m4"]);
        assert_eq!(json["win_rate"], 0.0);
    }

    #[tokio::test]
    async fn test_team_detail_not_found() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/teams/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
