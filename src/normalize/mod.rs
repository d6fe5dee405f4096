//! Row normalization.
//!
//! Turns raw source rows into flat, fully-defaulted models:
//! - missing or unparseable numbers become `0`
//! - missing booleans become `false`
//! - array-or-object relations collapse to their first element
//!
//! Every function here is pure and total; nothing downstream ever sees a hole.

pub mod lenient;
mod raw;

pub use raw::*;

use crate::models::{EntityId, Match, PlayerStatLine, Team, FREE_AGENT};

/// Name given to a team row without one.
pub const UNKNOWN_TEAM: &str = "Unknown Team";

/// Gamertag given to a player row without one.
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// First item, or `default` when there is none.
pub fn first_or_default<I: IntoIterator>(items: I, default: I::Item) -> I::Item {
    items.into_iter().next().unwrap_or(default)
}

fn positive_rank(rank: Option<i64>) -> Option<u32> {
    rank.filter(|r| *r > 0).and_then(|r| u32::try_from(r).ok())
}

fn count(value: Option<i64>) -> u32 {
    value
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

pub fn normalize_team(row: RawTeamRow) -> Team {
    Team {
        id: row.id.unwrap_or_default(),
        name: row.name.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
        logo_url: row.logo_url,
        region: row.region,
        current_rp: row.current_rp.filter(|rp| *rp >= 0.0),
        elo_rating: row.elo_rating,
        global_rank: positive_rank(row.global_rank),
        leaderboard_tier: row.leaderboard_tier,
    }
}

/// A match keeps its scores only when both are present and non-negative.
pub fn normalize_match(row: RawMatchRow) -> Match {
    let score = |s: Option<i64>| s.and_then(|v| u32::try_from(v).ok());
    let (score_a, score_b) = match (score(row.score_a), score(row.score_b)) {
        (Some(a), Some(b)) => (Some(a), Some(b)),
        _ => (None, None),
    };

    Match {
        id: row.id.unwrap_or_default(),
        team_a_id: row.team_a_id,
        team_b_id: row.team_b_id,
        score_a,
        score_b,
        played_at: row.played_at,
        stage: row.stage,
    }
}

impl RawStatRow {
    /// Field-by-field merge, preferring `self`.
    fn or(self, fallback: RawStatRow) -> RawStatRow {
        RawStatRow {
            player_id: self.player_id.or(fallback.player_id),
            points_per_game: self.points_per_game.or(fallback.points_per_game),
            assists_per_game: self.assists_per_game.or(fallback.assists_per_game),
            rebounds_per_game: self.rebounds_per_game.or(fallback.rebounds_per_game),
            steals_per_game: self.steals_per_game.or(fallback.steals_per_game),
            blocks_per_game: self.blocks_per_game.or(fallback.blocks_per_game),
            field_goal_percentage: self.field_goal_percentage.or(fallback.field_goal_percentage),
            three_point_percentage: self
                .three_point_percentage
                .or(fallback.three_point_percentage),
            free_throw_percentage: self.free_throw_percentage.or(fallback.free_throw_percentage),
            games_played: self.games_played.or(fallback.games_played),
            is_rookie: self.is_rookie.or(fallback.is_rookie),
            overall_rating: self.overall_rating.or(fallback.overall_rating),
        }
    }
}

/// Flatten a player row with its embedded team and stats relations.
///
/// The first embedded stats row wins over flat columns, field by field.
/// Percentages are kept exactly as stored (fractions).
pub fn normalize_player(row: RawPlayerRow) -> PlayerStatLine {
    let teams = row.teams.map(Relation::into_vec).unwrap_or_default();
    let team_names: Vec<String> = teams
        .iter()
        .map(|t| t.name.clone().unwrap_or_else(|| UNKNOWN_TEAM.to_string()))
        .collect();
    let primary = first_or_default(teams, RawTeamRef::default());
    let team_name = first_or_default(team_names.iter().cloned(), FREE_AGENT.to_string());

    let nested = row.player_stats.map(Relation::into_vec).unwrap_or_default();
    let stats = first_or_default(nested, RawStatRow::default()).or(row.stats);

    let player_id = row
        .id
        .or_else(|| stats.player_id.clone())
        .unwrap_or_else(EntityId::default);

    PlayerStatLine {
        player_id,
        gamertag: row.gamertag.unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        position: row.position,
        team_name,
        team_logo_url: primary.logo_url,
        team_names,
        global_rank: positive_rank(row.global_rank),
        points_per_game: stats.points_per_game.unwrap_or(0.0),
        assists_per_game: stats.assists_per_game.unwrap_or(0.0),
        rebounds_per_game: stats.rebounds_per_game.unwrap_or(0.0),
        steals_per_game: stats.steals_per_game.unwrap_or(0.0),
        blocks_per_game: stats.blocks_per_game.unwrap_or(0.0),
        field_goal_percentage: stats.field_goal_percentage.unwrap_or(0.0),
        three_point_percentage: stats.three_point_percentage.unwrap_or(0.0),
        free_throw_percentage: stats.free_throw_percentage.unwrap_or(0.0),
        games_played: count(stats.games_played),
        is_rookie: stats.is_rookie.unwrap_or(false),
        overall_rating: stats.overall_rating.unwrap_or(0.0),
    }
}

pub fn normalize_teams(rows: Vec<RawTeamRow>) -> Vec<Team> {
    rows.into_iter().map(normalize_team).collect()
}

pub fn normalize_matches(rows: Vec<RawMatchRow>) -> Vec<Match> {
    rows.into_iter().map(normalize_match).collect()
}

pub fn normalize_players(rows: Vec<RawPlayerRow>) -> Vec<PlayerStatLine> {
    rows.into_iter().map(normalize_player).collect()
}
