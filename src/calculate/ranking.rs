//! Standings order.

use std::cmp::Ordering;

use crate::models::{Match, Team, TeamRecord, TeamStanding};

use super::records::aggregate_record;

/// Wins descending, then point differential descending.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.points_differential.cmp(&a.points_differential))
}

pub fn compare_teams(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    compare_records(&a.record, &b.record)
}

/// Sort standings in place. Stable: exact ties keep input order.
pub fn rank_standings(standings: &mut [TeamStanding]) {
    standings.sort_by(compare_teams);
}

/// Aggregate every team's record and rank the result.
pub fn build_standings(teams: &[Team], matches: &[Match]) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| TeamStanding {
            team: team.clone(),
            record: aggregate_record(&team.id, matches),
        })
        .collect();
    rank_standings(&mut standings);
    standings
}

/// Teams by ranking points, highest first; teams without RP go last.
pub fn rank_by_ranking_points(teams: &[Team]) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| match (a.current_rp, b.current_rp) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}
