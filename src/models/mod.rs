//! Core data models for the league dashboard.

mod award;
mod ids;
mod matches;
mod player;
mod record;
mod team;

pub use award::*;
pub use ids::*;
pub use matches::*;
pub use player::*;
pub use record::*;
pub use team::*;
