//! Team model.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// A team as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    pub id: TeamId,

    /// Display name
    pub name: String,

    /// Logo image URL
    pub logo_url: Option<String>,

    /// Region (e.g., "NA", "EU")
    pub region: Option<String>,

    /// Accumulated ranking points (never negative)
    pub current_rp: Option<f64>,

    /// Elo rating
    pub elo_rating: Option<f64>,

    /// Position on the global leaderboard (1 = best)
    pub global_rank: Option<u32>,

    /// Leaderboard tier label
    pub leaderboard_tier: Option<String>,
}

impl Team {
    /// Create a team with only identity fields set.
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            region: None,
            current_rp: None,
            elo_rating: None,
            global_rank: None,
            leaderboard_tier: None,
        }
    }

    /// Builder method to set ranking points.
    pub fn with_ranking_points(mut self, rp: f64) -> Self {
        self.current_rp = Some(rp);
        self
    }
}
