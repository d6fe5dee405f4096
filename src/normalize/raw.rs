//! Raw rows as they come out of the data source.
//!
//! Every field is optional and read through the lenient deserializers, so any
//! JSON object parses into a row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::models::EntityId;

/// A relational lookup that the source returns either as one object or as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Relation<T> {
    /// All related rows, in source order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Relation::Many(items) => items,
            Relation::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeamRow {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub current_rp: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub elo_rating: Option<f64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub global_rank: Option<i64>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub leaderboard_tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMatchRow {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub team_a_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub team_b_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub score_a: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub score_b: Option<i64>,
    #[serde(deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub played_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// Team reference embedded in a player row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeamRef {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Season averages, either flat on the player row or as an embedded `player_stats` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStatRow {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub player_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub points_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub assists_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rebounds_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub steals_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub blocks_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub field_goal_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub three_point_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub free_throw_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub games_played: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub is_rookie: Option<bool>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlayerRow {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gamertag: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub global_rank: Option<i64>,

    #[serde(
        alias = "team",
        deserialize_with = "lenient::relation",
        skip_serializing_if = "Option::is_none"
    )]
    pub teams: Option<Relation<RawTeamRef>>,

    #[serde(deserialize_with = "lenient::relation", skip_serializing_if = "Option::is_none")]
    pub player_stats: Option<Relation<RawStatRow>>,

    /// Stat columns found directly on the player row.
    #[serde(flatten)]
    pub stats: RawStatRow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_parses() {
        let row: RawPlayerRow = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row, RawPlayerRow::default());

        let row: RawMatchRow = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row, RawMatchRow::default());
    }

    #[test]
    fn test_relation_object_or_array() {
        let one: RawPlayerRow =
            serde_json::from_value(json!({"teams": {"name": "Night Owls"}})).unwrap();
        let many: RawPlayerRow = serde_json::from_value(json!({
            "teams": [{"name": "Night Owls"}, {"name": "Sky Kings"}]
        }))
        .unwrap();

        assert_eq!(one.teams.unwrap().into_vec().len(), 1);
        assert_eq!(many.teams.unwrap().into_vec().len(), 2);
    }

    #[test]
    fn test_malformed_relation_degrades_to_none() {
        let row: RawPlayerRow =
            serde_json::from_value(json!({"gamertag": "Ace", "teams": "oops"})).unwrap();
        assert!(row.teams.is_none());
        assert_eq!(row.gamertag.as_deref(), Some("Ace"));
    }

    #[test]
    fn test_flat_stats_on_player_row() {
        let row: RawPlayerRow = serde_json::from_value(json!({
            "id": 7,
            "gamertag": "Ace",
            "points_per_game": "21.5",
            "games_played": 9,
            "is_rookie": "true"
        }))
        .unwrap();

        assert_eq!(row.id, Some(EntityId::from("7")));
        assert_eq!(row.stats.points_per_game, Some(21.5));
        assert_eq!(row.stats.games_played, Some(9));
        assert_eq!(row.stats.is_rookie, Some(true));
    }

    #[test]
    fn test_match_row_bad_cells() {
        let row: RawMatchRow = serde_json::from_value(json!({
            "id": "m1",
            "team_a_id": "t1",
            "team_b_id": null,
            "score_a": "eighty",
            "played_at": "not a date"
        }))
        .unwrap();

        assert_eq!(row.team_a_id, Some(EntityId::from("t1")));
        assert!(row.team_b_id.is_none());
        assert!(row.score_a.is_none());
        assert!(row.played_at.is_none());
    }
}
