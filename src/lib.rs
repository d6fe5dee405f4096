//! # League Dashboard
//!
//! Statistics core for an esports basketball league dashboard.
//!
//! ## Architecture
//!
//! - **models**: Teams, matches, player stat lines, records and awards
//! - **normalize**: Lenient raw rows and their flattening into models
//! - **calculate**: Records, standings, awards races and the leaderboard
//! - **storage**: JSONL data directory
//! - **source**: Row sources (local JSONL, hosted REST database)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod normalize;
pub mod source;
pub mod storage;

pub use models::*;
