use async_trait::async_trait;

use super::{RowSource, SourceError};
use crate::normalize::{RawMatchRow, RawPlayerRow, RawTeamRow};
use crate::storage::{EntityType, JsonlReader, StorageConfig};

/// Reads raw rows from the local data directory.
pub struct JsonlSource {
    storage: StorageConfig,
}

impl JsonlSource {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RowSource for JsonlSource {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn teams(&self) -> Result<Vec<RawTeamRow>, SourceError> {
        Ok(JsonlReader::for_entity(&self.storage, EntityType::Team).read_all()?)
    }

    async fn matches(&self) -> Result<Vec<RawMatchRow>, SourceError> {
        Ok(JsonlReader::for_entity(&self.storage, EntityType::Match).read_all()?)
    }

    async fn players(&self) -> Result<Vec<RawPlayerRow>, SourceError> {
        Ok(JsonlReader::for_entity(&self.storage, EntityType::Player).read_all()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Dataset;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_data_dir_loads_empty_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonlSource::new(StorageConfig::new(temp_dir.path().to_path_buf()));

        let dataset = Dataset::load(&source).await.unwrap();

        assert!(dataset.teams.is_empty());
        assert!(dataset.matches.is_empty());
        assert!(dataset.players.is_empty());
    }

    #[tokio::test]
    async fn test_reads_embedded_player_relations() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("players.jsonl"),
            r#"{"id":"p1","gamertag":"Ace","position":"PG","teams":[{"id":"t1","name":"Night Owls"}],"player_stats":[{"points_per_game":"21.5","games_played":8,"is_rookie":true}]}
"#,
        )
        .unwrap();
        let source = JsonlSource::new(StorageConfig::new(temp_dir.path().to_path_buf()));

        let dataset = Dataset::load(&source).await.unwrap();
        let player = &dataset.players[0];

        assert_eq!(player.gamertag, "Ace");
        assert_eq!(player.team_name, "Night Owls");
        assert_eq!(player.points_per_game, 21.5);
        assert_eq!(player.games_played, 8);
        assert!(player.is_rookie);
    }
}
