//! Team records and match history.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{Match, MatchHistoryEntry, MatchResult, TeamId, TeamRecord};

/// Draws are not a separate bucket in [`TeamRecord`]: `losses` is
/// `games_played - wins`, so a tied match lands there.
pub const DRAW_COUNTS_AS_LOSS: bool = true;

/// Aggregate a team's record over its completed matches.
///
/// Matches the team is not part of, and matches without both scores, are ignored.
pub fn aggregate_record(team_id: &TeamId, matches: &[Match]) -> TeamRecord {
    let mut record = TeamRecord::default();
    let mut strict_losses = 0;

    for (own, opponent) in matches.iter().filter_map(|m| m.scores_for(team_id)) {
        record.games_played += 1;
        record.points_for += u64::from(own);
        record.points_against += u64::from(opponent);

        match MatchResult::from_scores(own, opponent) {
            MatchResult::Win => record.wins += 1,
            MatchResult::Loss => strict_losses += 1,
            MatchResult::Draw => record.draws += 1,
        }
    }

    record.losses = if DRAW_COUNTS_AS_LOSS {
        record.games_played - record.wins
    } else {
        strict_losses
    };
    record.points_differential = record.points_for as i64 - record.points_against as i64;
    record
}

/// The team's result in a completed match, if it played in it.
pub fn match_result(team_id: &TeamId, m: &Match) -> Option<MatchResult> {
    m.scores_for(team_id)
        .map(|(own, opponent)| MatchResult::from_scores(own, opponent))
}

/// Most recent first; undated matches sort last.
fn most_recent_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Soonest first; unscheduled matches sort last.
fn soonest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Completed matches for a team, most recent first.
pub fn team_match_history(team_id: &TeamId, matches: &[Match]) -> Vec<MatchHistoryEntry> {
    let mut history: Vec<MatchHistoryEntry> = matches
        .iter()
        .filter_map(|m| {
            let (own_score, opponent_score) = m.scores_for(team_id)?;
            Some(MatchHistoryEntry {
                match_id: m.id.clone(),
                opponent_id: m.opponent_of(team_id).cloned(),
                own_score,
                opponent_score,
                result: MatchResult::from_scores(own_score, opponent_score),
                played_at: m.played_at,
                stage: m.stage.clone(),
            })
        })
        .collect();

    history.sort_by(|a, b| most_recent_first(&a.played_at, &b.played_at));
    history
}

/// Matches not yet played as of `now`, soonest first.
pub fn upcoming_matches(matches: &[Match], now: DateTime<Utc>) -> Vec<&Match> {
    let mut upcoming: Vec<&Match> = matches.iter().filter(|m| m.is_upcoming(now)).collect();
    upcoming.sort_by(|a, b| soonest_first(&a.played_at, &b.played_at));
    upcoming
}

/// Completed matches, most recent first, at most `limit`.
pub fn recent_results(matches: &[Match], limit: usize) -> Vec<&Match> {
    let mut recent: Vec<&Match> = matches.iter().filter(|m| m.is_completed()).collect();
    recent.sort_by(|a, b| most_recent_first(&a.played_at, &b.played_at));
    recent.truncate(limit);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn team(id: &str) -> TeamId {
        TeamId::from(id)
    }

    fn played(id: &str, a: &str, b: &str, score_a: u32, score_b: u32) -> Match {
        Match::new(id, Some(team(a)), Some(team(b))).with_score(score_a, score_b)
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_scenario_team_record() {
        let matches = vec![
            played("m1", "T1", "T2", 80, 70),
            played("m2", "T3", "T1", 60, 65),
            Match::new("m3", Some(team("T1")), Some(team("T4"))),
        ];

        let record = aggregate_record(&team("T1"), &matches);

        assert_eq!(
            record,
            TeamRecord {
                games_played: 2,
                wins: 2,
                losses: 0,
                draws: 0,
                points_for: 145,
                points_against: 130,
                points_differential: 15,
            }
        );
    }

    #[test]
    fn test_empty_matches_yield_zero_record() {
        assert_eq!(aggregate_record(&team("T1"), &[]), TeamRecord::default());
    }

    #[test]
    fn test_draw_counts_as_loss() {
        let matches = vec![played("m1", "T1", "T2", 50, 50), played("m2", "T1", "T2", 60, 40)];
        let record = aggregate_record(&team("T1"), &matches);

        assert_eq!(record.games_played, 2);
        assert_eq!(record.wins, 1);
        assert_eq!(record.losses, 1);
        assert_eq!(record.draws, 1);
    }

    #[test]
    fn test_record_totals_are_consistent() {
        let matches = vec![
            played("m1", "T1", "T2", 80, 90),
            played("m2", "T2", "T1", 55, 70),
            played("m3", "T1", "T3", 66, 66),
            played("m4", "T3", "T2", 40, 30),
            Match::new("m5", Some(team("T1")), None),
        ];

        for id in ["T1", "T2", "T3", "T4"] {
            let record = aggregate_record(&team(id), &matches);
            assert_eq!(record.wins + record.losses, record.games_played);
            assert_eq!(
                record.points_differential,
                record.points_for as i64 - record.points_against as i64
            );
        }
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let matches = vec![played("m1", "T1", "T2", 80, 70), played("m2", "T2", "T1", 90, 70)];
        let first = aggregate_record(&team("T1"), &matches);
        let second = aggregate_record(&team("T1"), &matches);
        assert_eq!(first, second);
        assert_eq!(first.points_differential, -10);
    }

    #[test]
    fn test_match_result() {
        let m = played("m1", "T1", "T2", 80, 70);
        assert_eq!(match_result(&team("T1"), &m), Some(MatchResult::Win));
        assert_eq!(match_result(&team("T2"), &m), Some(MatchResult::Loss));
        assert_eq!(match_result(&team("T3"), &m), None);
    }

    #[test]
    fn test_team_match_history_most_recent_first() {
        let matches = vec![
            played("m1", "T1", "T2", 80, 70).with_played_at(day(1)),
            played("m2", "T3", "T1", 60, 60),
            played("m3", "T3", "T1", 75, 65).with_played_at(day(5)),
            played("m4", "T2", "T3", 10, 20).with_played_at(day(9)),
        ];

        let history = team_match_history(&team("T1"), &matches);
        let ids: Vec<&str> = history.iter().map(|h| h.match_id.as_str()).collect();

        assert_eq!(ids, vec!["m3", "m1", "m2"]);
        assert_eq!(history[0].result, MatchResult::Loss);
        assert_eq!(history[0].own_score, 65);
        assert_eq!(history[0].opponent_id, Some(team("T3")));
        assert_eq!(history[2].result, MatchResult::Draw);
    }

    #[test]
    fn test_upcoming_matches() {
        let now = day(10);
        let matches = vec![
            Match::new("tbd", Some(team("T1")), None),
            Match::new("late", Some(team("T1")), Some(team("T2"))).with_played_at(day(20)),
            Match::new("soon", Some(team("T3")), Some(team("T4"))).with_played_at(day(12)),
            Match::new("past", Some(team("T3")), Some(team("T4"))).with_played_at(day(2)),
            played("done", "T1", "T2", 1, 0).with_played_at(day(15)),
        ];

        let ids: Vec<&str> = upcoming_matches(&matches, now)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["soon", "late", "tbd"]);
    }

    #[test]
    fn test_huge_scores_do_not_overflow_totals() {
        let matches = vec![
            played("m1", "T1", "T2", 3_000_000_000, 0),
            played("m2", "T1", "T2", 3_000_000_000, 0),
            played("m3", "T2", "T1", u32::MAX, u32::MAX),
        ];

        let record = aggregate_record(&team("T1"), &matches);

        assert_eq!(record.points_for, 6_000_000_000 + u64::from(u32::MAX));
        assert_eq!(record.points_against, u64::from(u32::MAX));
        assert_eq!(record.points_differential, 6_000_000_000);
        assert_eq!(record.wins, 2);
        assert_eq!(record.draws, 1);
    }

    #[test]
    fn test_recent_results_limit() {
        let matches = vec![
            played("m1", "T1", "T2", 1, 0).with_played_at(day(1)),
            played("m2", "T1", "T2", 1, 0).with_played_at(day(3)),
            Match::new("m3", Some(team("T1")), Some(team("T2"))).with_played_at(day(4)),
            played("m4", "T1", "T2", 1, 0).with_played_at(day(2)),
        ];

        let ids: Vec<&str> = recent_results(&matches, 2)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m2", "m4"]);
    }
}
