//! Statistics calculation engine.
//!
//! Pure, synchronous functions over already-normalized rows:
//! - Team records, match results and match history
//! - Standings order (wins, then point differential)
//! - Awards races (OMVP, DMVP, Rookie)
//! - Player leaderboard filtering and sorting
//!
//! Nothing here reads the clock, the environment or any shared state.

pub mod awards;
pub mod leaderboard;
pub mod ranking;
pub mod records;

pub use awards::{
    award_race, compute_awards, compute_awards_with, AwardSettings, AWARD_LIST_SIZE,
    MIN_GAMES_FOR_AWARDS,
};
pub use leaderboard::{filter_and_sort, LeaderboardQuery, PositionFilter, SortDirection, SortField};
pub use ranking::{
    build_standings, compare_records, compare_teams, rank_by_ranking_points, rank_standings,
};
pub use records::{
    aggregate_record, match_result, recent_results, team_match_history, upcoming_matches,
    DRAW_COUNTS_AS_LOSS,
};
