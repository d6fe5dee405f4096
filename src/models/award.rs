//! Awards race models.

use serde::{Deserialize, Serialize};

use super::PlayerStatLine;

/// Award category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardCategory {
    /// Offensive MVP
    Omvp,
    /// Defensive MVP
    Dmvp,
    /// Rookie of the year
    Rookie,
}

impl AwardCategory {
    pub const ALL: [AwardCategory; 3] = [
        AwardCategory::Omvp,
        AwardCategory::Dmvp,
        AwardCategory::Rookie,
    ];

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            AwardCategory::Omvp => "Offensive MVP",
            AwardCategory::Dmvp => "Defensive MVP",
            AwardCategory::Rookie => "Rookie of the Year",
        }
    }

    /// Weighted composite for this category. Weights sum to 1.0.
    ///
    /// Percentages are used as stored fractions, never scaled to 0–100.
    pub fn rating(&self, p: &PlayerStatLine) -> f64 {
        match self {
            AwardCategory::Omvp => {
                0.4 * p.points_per_game
                    + 0.3 * p.assists_per_game
                    + 0.2 * p.field_goal_percentage
                    + 0.1 * p.three_point_percentage
            }
            AwardCategory::Dmvp => {
                0.4 * p.steals_per_game + 0.3 * p.blocks_per_game + 0.3 * p.rebounds_per_game
            }
            AwardCategory::Rookie => {
                0.3 * p.points_per_game
                    + 0.2 * p.assists_per_game
                    + 0.2 * p.steals_per_game
                    + 0.15 * p.field_goal_percentage
                    + 0.15 * p.overall_rating
            }
        }
    }
}

impl std::fmt::Display for AwardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A candidate in one award race: the full stat line plus that race's rating.
///
/// Exactly one of the three rating fields is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRating {
    #[serde(flatten)]
    pub player: PlayerStatLine,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offensive_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defensive_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rookie_rating: Option<f64>,
}

impl AwardRating {
    /// Rate a player for a category, injecting only that category's field.
    pub fn new(category: AwardCategory, player: &PlayerStatLine) -> Self {
        let rating = category.rating(player);
        let mut rated = Self {
            player: player.clone(),
            offensive_rating: None,
            defensive_rating: None,
            rookie_rating: None,
        };
        match category {
            AwardCategory::Omvp => rated.offensive_rating = Some(rating),
            AwardCategory::Dmvp => rated.defensive_rating = Some(rating),
            AwardCategory::Rookie => rated.rookie_rating = Some(rating),
        }
        rated
    }

    /// Whichever rating is set.
    pub fn rating(&self) -> f64 {
        self.offensive_rating
            .or(self.defensive_rating)
            .or(self.rookie_rating)
            .unwrap_or(0.0)
    }
}

/// Top candidates per award race.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Awards {
    pub omvp: Vec<AwardRating>,
    pub dmvp: Vec<AwardRating>,
    pub rookie: Vec<AwardRating>,
}

impl Awards {
    /// The list for a category.
    pub fn race(&self, category: AwardCategory) -> &[AwardRating] {
        match category {
            AwardCategory::Omvp => &self.omvp,
            AwardCategory::Dmvp => &self.dmvp,
            AwardCategory::Rookie => &self.rookie,
        }
    }
}
