//! Match model: a scheduled or completed game between two teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, TeamId};

/// A match between two teams. Either side may still be TBD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier
    pub id: MatchId,

    /// Home side (None while TBD)
    pub team_a_id: Option<TeamId>,

    /// Away side (None while TBD)
    pub team_b_id: Option<TeamId>,

    /// Final score for team A. Present only together with `score_b`.
    pub score_a: Option<u32>,

    /// Final score for team B. Present only together with `score_a`.
    pub score_b: Option<u32>,

    /// Tip-off time, None when unscheduled
    pub played_at: Option<DateTime<Utc>>,

    /// Bracket stage label (e.g., "Group A", "Final")
    pub stage: Option<String>,
}

impl Match {
    /// Create an unscheduled match between two sides.
    pub fn new(
        id: impl Into<MatchId>,
        team_a_id: Option<TeamId>,
        team_b_id: Option<TeamId>,
    ) -> Self {
        Self {
            id: id.into(),
            team_a_id,
            team_b_id,
            score_a: None,
            score_b: None,
            played_at: None,
            stage: None,
        }
    }

    /// Builder method to set the final score.
    pub fn with_score(mut self, score_a: u32, score_b: u32) -> Self {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self
    }

    /// Builder method to set the tip-off time.
    pub fn with_played_at(mut self, played_at: DateTime<Utc>) -> Self {
        self.played_at = Some(played_at);
        self
    }

    /// Both final scores, if the match has been played.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Whether both scores have been recorded.
    pub fn is_completed(&self) -> bool {
        self.final_score().is_some()
    }

    /// Whether the team occupies either side.
    pub fn involves(&self, team_id: &TeamId) -> bool {
        self.team_a_id.as_ref() == Some(team_id) || self.team_b_id.as_ref() == Some(team_id)
    }

    /// `(own, opponent)` scores from the team's point of view.
    ///
    /// None when the team is not playing or the match has no final score.
    pub fn scores_for(&self, team_id: &TeamId) -> Option<(u32, u32)> {
        let (a, b) = self.final_score()?;
        if self.team_a_id.as_ref() == Some(team_id) {
            Some((a, b))
        } else if self.team_b_id.as_ref() == Some(team_id) {
            Some((b, a))
        } else {
            None
        }
    }

    /// The other side from the team's point of view.
    pub fn opponent_of(&self, team_id: &TeamId) -> Option<&TeamId> {
        if self.team_a_id.as_ref() == Some(team_id) {
            self.team_b_id.as_ref()
        } else if self.team_b_id.as_ref() == Some(team_id) {
            self.team_a_id.as_ref()
        } else {
            None
        }
    }

    /// Not yet played: no final score, and unscheduled or scheduled after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.played_at.map_or(true, |at| at > now)
    }
}
