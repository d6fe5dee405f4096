use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::{
    filter_and_sort, LeaderboardQuery, PositionFilter, SortDirection, SortField,
};
use crate::models::PlayerStatLine;

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub search: Option<String>,
    pub position: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerStatLine>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub pagination: PaginationMeta,
}

impl ListPlayersParams {
    /// Build the leaderboard query, falling back to the configured sort.
    fn to_query(
        &self,
        default_sort: SortField,
        default_direction: SortDirection,
    ) -> Result<LeaderboardQuery, ApiError> {
        let sort_field = match self.sort.as_deref() {
            Some(s) if !s.is_empty() => s.parse::<SortField>().map_err(ApiError::BadRequest)?,
            _ => default_sort,
        };
        let sort_direction = match self.direction.as_deref() {
            Some(d) if !d.is_empty() => {
                d.parse::<SortDirection>().map_err(ApiError::BadRequest)?
            }
            _ => default_direction,
        };
        let position_filter = match self.position.as_deref() {
            Some(p) => p.parse::<PositionFilter>().unwrap_or_default(),
            None => PositionFilter::All,
        };

        Ok(LeaderboardQuery {
            search_term: self.search.clone().unwrap_or_default(),
            position_filter,
            sort_field,
            sort_direction,
        })
    }
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let settings = &state.config.leaderboard;
    let query = params.to_query(settings.default_sort, settings.default_direction)?;

    let dataset = state.dataset().await?;
    let rows = filter_and_sort(&dataset.players, &query);

    let pagination =
        Pagination::with_default_size(params.page, params.page_size, settings.page_size);
    let meta = PaginationMeta::new(&pagination, rows.len() as u32);
    let players = pagination
        .page_of(&rows)
        .iter()
        .map(|p| (*p).clone())
        .collect();

    Ok(Json(PlayerListResponse {
        players,
        sort: query.sort_field,
        direction: query.sort_direction,
        pagination: meta,
    }))
}
