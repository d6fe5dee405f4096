pub mod awards;
pub mod health;
pub mod matches;
pub mod players;
pub mod teams;

use serde::Deserialize;

/// `?limit=` on list endpoints.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}
