use std::io::ErrorKind;

use apprelay_application::TemplateStore;
use apprelay_core::{AppError, AppResult};
use apprelay_domain::SubjectType;
use async_trait::async_trait;

use crate::relay_config::ConfigHandle;

/// Loads content templates from the configured directory on every render.
pub struct FileTemplateStore {
    config: ConfigHandle,
}

impl FileTemplateStore {
    /// Creates a store resolving paths from the current config snapshot.
    #[must_use]
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn load_template(&self, subject_type: SubjectType) -> AppResult<Option<String>> {
        let path = self.config.current().templates.path_for(subject_type);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read template {}: {error}",
                path.display()
            ))),
        }
    }
}
