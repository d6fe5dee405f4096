//! Derived team records and standings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, Team, TeamId};

/// A team's aggregate over its completed matches.
///
/// `wins + losses == games_played` always; a draw lands in `losses` and is
/// also counted in `draws`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub points_differential: i64,
}

impl TeamRecord {
    /// Win rate as a fraction (0.0 to 1.0).
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }
}

/// Outcome of a completed match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    /// Classify own vs opponent score.
    pub fn from_scores(own: u32, opponent: u32) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Win => write!(f, "W"),
            MatchResult::Loss => write!(f, "L"),
            MatchResult::Draw => write!(f, "D"),
        }
    }
}

/// One completed match in a team's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub match_id: MatchId,
    pub opponent_id: Option<TeamId>,
    pub own_score: u32,
    pub opponent_score: u32,
    pub result: MatchResult,
    pub played_at: Option<DateTime<Utc>>,
    pub stage: Option<String>,
}

/// A team together with its aggregate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(flatten)]
    pub team: Team,
    pub record: TeamRecord,
}
