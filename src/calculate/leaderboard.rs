//! Player leaderboard: search, position filter and column sort.
//!
//! Pagination is left to the caller.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::PlayerStatLine;

/// Sortable leaderboard columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "rank")]
    Rank,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "team")]
    Team,
    #[serde(rename = "ppg")]
    #[default]
    Ppg,
    #[serde(rename = "rpg")]
    Rpg,
    #[serde(rename = "apg")]
    Apg,
    #[serde(rename = "spg")]
    Spg,
    #[serde(rename = "bpg")]
    Bpg,
    #[serde(rename = "fg")]
    FieldGoal,
    #[serde(rename = "threePt")]
    ThreePoint,
    #[serde(rename = "ft")]
    FreeThrow,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rank => "rank",
            SortField::Name => "name",
            SortField::Team => "team",
            SortField::Ppg => "ppg",
            SortField::Rpg => "rpg",
            SortField::Apg => "apg",
            SortField::Spg => "spg",
            SortField::Bpg => "bpg",
            SortField::FieldGoal => "fg",
            SortField::ThreePoint => "threePt",
            SortField::FreeThrow => "ft",
        }
    }

    /// Ascending comparison on this column.
    pub fn compare(&self, a: &PlayerStatLine, b: &PlayerStatLine) -> Ordering {
        match self {
            SortField::Name => compare_text(&a.gamertag, &b.gamertag),
            SortField::Team => compare_text(&a.team_name, &b.team_name),
            // Unranked players sort as rank 0.
            SortField::Rank => compare_by(a, b, |p| p.global_rank.map_or(0.0, f64::from)),
            SortField::Ppg => compare_by(a, b, |p| p.points_per_game),
            SortField::Rpg => compare_by(a, b, |p| p.rebounds_per_game),
            SortField::Apg => compare_by(a, b, |p| p.assists_per_game),
            SortField::Spg => compare_by(a, b, |p| p.steals_per_game),
            SortField::Bpg => compare_by(a, b, |p| p.blocks_per_game),
            SortField::FieldGoal => compare_by(a, b, |p| p.field_goal_percentage),
            SortField::ThreePoint => compare_by(a, b, |p| p.three_point_percentage),
            SortField::FreeThrow => compare_by(a, b, |p| p.free_throw_percentage),
        }
    }
}

fn compare_by(
    a: &PlayerStatLine,
    b: &PlayerStatLine,
    value: impl Fn(&PlayerStatLine) -> f64,
) -> Ordering {
    value(a).total_cmp(&value(b))
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "rank" => SortField::Rank,
            "name" => SortField::Name,
            "team" => SortField::Team,
            "ppg" => SortField::Ppg,
            "rpg" => SortField::Rpg,
            "apg" => SortField::Apg,
            "spg" => SortField::Spg,
            "bpg" => SortField::Bpg,
            "fg" => SortField::FieldGoal,
            "threePt" => SortField::ThreePoint,
            "ft" => SortField::FreeThrow,
            other => return Err(format!("unknown sort field: {}", other)),
        };
        Ok(field)
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Position filter; `"all"` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PositionFilter {
    #[default]
    All,
    Only(String),
}

impl PositionFilter {
    pub fn matches(&self, position: Option<&str>) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(wanted) => position == Some(wanted.as_str()),
        }
    }
}

impl FromStr for PositionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(PositionFilter::All)
        } else {
            Ok(PositionFilter::Only(s.to_string()))
        }
    }
}

/// Leaderboard query.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardQuery {
    pub search_term: String,
    pub position_filter: PositionFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            position_filter: PositionFilter::All,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

/// Case-insensitive ordering, falling back to the raw text so distinct
/// strings never compare equal.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn matches_search(player: &PlayerStatLine, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    player.gamertag.to_lowercase().contains(needle)
        || player
            .team_names
            .iter()
            .any(|team| team.to_lowercase().contains(needle))
}

/// Filter and sort the leaderboard.
///
/// Sorting is stable, so players tied on the sort column keep input order
/// in both directions.
pub fn filter_and_sort<'a>(
    players: &'a [PlayerStatLine],
    query: &LeaderboardQuery,
) -> Vec<&'a PlayerStatLine> {
    let needle = query.search_term.trim().to_lowercase();

    let mut rows: Vec<&PlayerStatLine> = players
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| query.position_filter.matches(p.position.as_deref()))
        .collect();

    rows.sort_by(|a, b| {
        let ord = query.sort_field.compare(a, b);
        match query.sort_direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, gamertag: &str, ppg: f64) -> PlayerStatLine {
        PlayerStatLine {
            points_per_game: ppg,
            ..PlayerStatLine::new(id, gamertag)
        }
    }

    fn query(sort_field: SortField, sort_direction: SortDirection) -> LeaderboardQuery {
        LeaderboardQuery {
            sort_field,
            sort_direction,
            ..Default::default()
        }
    }

    fn ids(rows: &[&PlayerStatLine]) -> Vec<String> {
        rows.iter().map(|p| p.player_id.to_string()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let players = vec![player("p1", "JohnDoe", 10.0), player("p2", "Ace", 12.0)];
        let q = LeaderboardQuery {
            search_term: "jo".to_string(),
            ..Default::default()
        };

        assert_eq!(ids(&filter_and_sort(&players, &q)), vec!["p1"]);
    }

    #[test]
    fn test_search_matches_any_team_name() {
        let players = vec![
            player("p1", "JohnDoe", 10.0).with_team("Night Owls").with_team("Sky Kings"),
            player("p2", "Ace", 12.0).with_team("Harbor Sharks"),
        ];
        let q = LeaderboardQuery {
            search_term: "KINGS".to_string(),
            ..Default::default()
        };

        assert_eq!(ids(&filter_and_sort(&players, &q)), vec!["p1"]);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let players = vec![player("p1", "a", 1.0), player("p2", "b", 2.0)];
        assert_eq!(filter_and_sort(&players, &LeaderboardQuery::default()).len(), 2);
    }

    #[test]
    fn test_position_filter() {
        let players = vec![
            player("p1", "a", 1.0).with_position("PG"),
            player("p2", "b", 2.0).with_position("C"),
            player("p3", "c", 3.0),
        ];
        let q = LeaderboardQuery {
            position_filter: "PG".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&players, &q)), vec!["p1"]);

        let all = LeaderboardQuery {
            position_filter: "all".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&players, &all).len(), 3);
    }

    #[test]
    fn test_stable_sort_on_equal_ppg() {
        let players = vec![
            player("p1", "a", 15.0),
            player("p2", "b", 20.0),
            player("p3", "c", 15.0),
            player("p4", "d", 15.0),
        ];

        let desc = filter_and_sort(&players, &query(SortField::Ppg, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["p2", "p1", "p3", "p4"]);

        let asc = filter_and_sort(&players, &query(SortField::Ppg, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["p1", "p3", "p4", "p2"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let players = vec![
            player("p1", "zed", 0.0),
            player("p2", "Alpha", 0.0),
            player("p3", "beta", 0.0),
        ];
        let rows = filter_and_sort(&players, &query(SortField::Name, SortDirection::Asc));
        assert_eq!(ids(&rows), vec!["p2", "p3", "p1"]);
    }

    #[test]
    fn test_sort_by_team_uses_primary_team() {
        let players = vec![
            player("p1", "a", 0.0).with_team("Sky Kings"),
            player("p2", "b", 0.0),
            player("p3", "c", 0.0).with_team("Atlas"),
        ];
        let rows = filter_and_sort(&players, &query(SortField::Team, SortDirection::Asc));
        // "Free Agent" sorts between "Atlas" and "Sky Kings".
        assert_eq!(ids(&rows), vec!["p3", "p2", "p1"]);
    }

    #[test]
    fn test_sort_by_rank_defaults_missing_to_zero() {
        let mut ranked = player("p1", "a", 0.0);
        ranked.global_rank = Some(2);
        let mut top = player("p2", "b", 0.0);
        top.global_rank = Some(1);
        let unranked = player("p3", "c", 0.0);

        let players = vec![ranked, top, unranked];
        let rows = filter_and_sort(&players, &query(SortField::Rank, SortDirection::Asc));
        assert_eq!(ids(&rows), vec!["p3", "p2", "p1"]);
    }

    #[test]
    fn test_compare_per_game_columns() {
        let mut a = player("p1", "a", 10.0);
        a.rebounds_per_game = 8.0;
        a.assists_per_game = 2.0;
        a.steals_per_game = 1.5;
        a.blocks_per_game = 0.2;
        a.field_goal_percentage = 0.52;
        let mut b = player("p2", "b", 10.0);
        b.rebounds_per_game = 3.0;
        b.assists_per_game = 9.0;
        b.steals_per_game = 1.5;
        b.blocks_per_game = 1.1;
        b.field_goal_percentage = 0.44;

        assert_eq!(SortField::Ppg.compare(&a, &b), Ordering::Equal);
        assert_eq!(SortField::Rpg.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortField::Apg.compare(&a, &b), Ordering::Less);
        assert_eq!(SortField::Spg.compare(&a, &b), Ordering::Equal);
        assert_eq!(SortField::Bpg.compare(&a, &b), Ordering::Less);
        assert_eq!(SortField::FieldGoal.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_percentage_columns() {
        let mut a = player("p1", "a", 0.0);
        a.three_point_percentage = 0.41;
        a.free_throw_percentage = 0.70;
        let mut b = player("p2", "b", 0.0);
        b.three_point_percentage = 0.35;
        b.free_throw_percentage = 0.90;

        let players = vec![a, b];
        let three = filter_and_sort(&players, &query(SortField::ThreePoint, SortDirection::Desc));
        assert_eq!(ids(&three), vec!["p1", "p2"]);
        let ft = filter_and_sort(&players, &query(SortField::FreeThrow, SortDirection::Desc));
        assert_eq!(ids(&ft), vec!["p2", "p1"]);
    }

    #[test]
    fn test_sort_field_wire_names() {
        for field in [
            SortField::Rank,
            SortField::Name,
            SortField::Team,
            SortField::Ppg,
            SortField::Rpg,
            SortField::Apg,
            SortField::Spg,
            SortField::Bpg,
            SortField::FieldGoal,
            SortField::ThreePoint,
            SortField::FreeThrow,
        ] {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
        assert!("points".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_filter_and_sort_is_pure() {
        let players = vec![player("p1", "a", 3.0), player("p2", "b", 3.0), player("p3", "c", 9.0)];
        let q = query(SortField::Ppg, SortDirection::Desc);

        assert_eq!(
            ids(&filter_and_sort(&players, &q)),
            ids(&filter_and_sort(&players, &q))
        );
        assert_eq!(players[0].player_id.as_str(), "p1");
    }
}
