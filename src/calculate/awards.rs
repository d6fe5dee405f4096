//! Awards races: OMVP, DMVP and Rookie of the Year.

use serde::{Deserialize, Serialize};

use crate::models::{AwardCategory, AwardRating, Awards, PlayerStatLine};

/// Minimum games played to enter any awards race.
pub const MIN_GAMES_FOR_AWARDS: u32 = 3;

/// Candidates listed per race.
pub const AWARD_LIST_SIZE: usize = 5;

/// Eligibility and list length for the awards races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardSettings {
    #[serde(default = "default_min_games")]
    pub min_games: u32,

    #[serde(default = "default_list_size")]
    pub list_size: usize,
}

fn default_min_games() -> u32 {
    MIN_GAMES_FOR_AWARDS
}

fn default_list_size() -> usize {
    AWARD_LIST_SIZE
}

impl Default for AwardSettings {
    fn default() -> Self {
        Self {
            min_games: default_min_games(),
            list_size: default_list_size(),
        }
    }
}

impl AwardSettings {
    /// Whether a player may appear in the given race.
    pub fn is_eligible(&self, category: AwardCategory, player: &PlayerStatLine) -> bool {
        player.games_played >= self.min_games
            && (category != AwardCategory::Rookie || player.is_rookie)
    }
}

/// Rate every eligible player for one race and keep the top of the list.
///
/// Ties keep their input order.
pub fn award_race(
    category: AwardCategory,
    players: &[PlayerStatLine],
    settings: &AwardSettings,
) -> Vec<AwardRating> {
    let mut rated: Vec<AwardRating> = players
        .iter()
        .filter(|p| settings.is_eligible(category, p))
        .map(|p| AwardRating::new(category, p))
        .collect();

    rated.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    rated.truncate(settings.list_size);
    rated
}

pub fn compute_awards_with(players: &[PlayerStatLine], settings: &AwardSettings) -> Awards {
    Awards {
        omvp: award_race(AwardCategory::Omvp, players, settings),
        dmvp: award_race(AwardCategory::Dmvp, players, settings),
        rookie: award_race(AwardCategory::Rookie, players, settings),
    }
}

/// All three races with the default eligibility and list size.
pub fn compute_awards(players: &[PlayerStatLine]) -> Awards {
    compute_awards_with(players, &AwardSettings::default())
}
