use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::compute_awards_with;
use crate::models::Awards;

pub async fn awards(State(state): State<AppState>) -> Result<Json<Awards>, ApiError> {
    let dataset = state.dataset().await?;
    Ok(Json(compute_awards_with(&dataset.players, &state.config.awards)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::build_router;
    use crate::api::routes::test_support::{fixture_app, get_json};
    use crate::api::state::AppState;
    use crate::config::AppConfig;
    use crate::source::MockSource;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    fn tags(race: &serde_json::Value) -> Vec<&str> {
        race.as_array()
            .unwrap()
            .iter()
            .map(|p| p["gamertag"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_awards_races() {
        let dir = TempDir::new().unwrap();
        let (status, json) = get_json(fixture_app(dir.path()), "/api/awards").await;

        assert_eq!(status, StatusCode::OK);
        // Cole has only 2 games and is left out everywhere
        assert_eq!(tags(&json["omvp"]), vec!["Ace", "bolt", "Dash"]);
        assert_eq!(tags(&json["dmvp"]), vec!["bolt", "Ace", "Dash"]);
        assert_eq!(tags(&json["rookie"]), vec!["bolt"]);

        let ace = &json["omvp"][0];
        assert!(ace["offensive_rating"].is_number());
        assert!(ace.get("defensive_rating").is_none());
        assert_eq!(ace["team_name"], "Night Owls");
    }

    #[tokio::test]
    async fn test_source_failure_is_500() {
        let source = Arc::new(MockSource {
            fail: true,
            ..Default::default()
        });
        let app = build_router(AppState::new(source, AppConfig::default()));

        let (status, json) = get_json(app, "/api/awards").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }
}
