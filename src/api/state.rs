use std::sync::Arc;

use crate::api::ApiError;
use crate::config::AppConfig;
use crate::source::{Dataset, RowSource};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RowSource>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn RowSource>, config: AppConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }

    /// Fetch and normalize the current rows.
    pub async fn dataset(&self) -> Result<Dataset, ApiError> {
        Ok(Dataset::load(self.source.as_ref()).await?)
    }
}
