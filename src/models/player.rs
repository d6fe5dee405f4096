//! Player statistics model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Team label shown for players without a roster spot.
pub const FREE_AGENT: &str = "Free Agent";

/// One player's flattened, fully-defaulted season line.
///
/// Per-game averages are plain averages; the three shooting percentages are
/// fractions in `0.0..=1.0`. Display layers scale them to percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: PlayerId,
    pub gamertag: String,
    pub position: Option<String>,

    /// Primary team (first roster entry), or [`FREE_AGENT`]
    pub team_name: String,
    pub team_logo_url: Option<String>,

    /// Every team the player is rostered on, in source order
    pub team_names: Vec<String>,

    /// Global leaderboard rank
    pub global_rank: Option<u32>,

    pub points_per_game: f64,
    pub assists_per_game: f64,
    pub rebounds_per_game: f64,
    pub steals_per_game: f64,
    pub blocks_per_game: f64,
    pub field_goal_percentage: f64,
    pub three_point_percentage: f64,
    pub free_throw_percentage: f64,
    pub games_played: u32,
    pub is_rookie: bool,
    pub overall_rating: f64,
}

impl PlayerStatLine {
    /// A zeroed stat line for an unrostered player.
    pub fn new(player_id: impl Into<PlayerId>, gamertag: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            gamertag: gamertag.into(),
            position: None,
            team_name: FREE_AGENT.to_string(),
            team_logo_url: None,
            team_names: Vec::new(),
            global_rank: None,
            points_per_game: 0.0,
            assists_per_game: 0.0,
            rebounds_per_game: 0.0,
            steals_per_game: 0.0,
            blocks_per_game: 0.0,
            field_goal_percentage: 0.0,
            three_point_percentage: 0.0,
            free_throw_percentage: 0.0,
            games_played: 0,
            is_rookie: false,
            overall_rating: 0.0,
        }
    }

    /// Builder method to put the player on a team. The first team added becomes primary.
    pub fn with_team(mut self, team_name: impl Into<String>) -> Self {
        let name = team_name.into();
        if self.team_names.is_empty() {
            self.team_name = name.clone();
        }
        self.team_names.push(name);
        self
    }

    /// Builder method to set the position label.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Whether the player has no roster spot.
    pub fn is_free_agent(&self) -> bool {
        self.team_names.is_empty()
    }
}
