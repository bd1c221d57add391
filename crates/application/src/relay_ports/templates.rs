use apprelay_core::AppResult;
use apprelay_domain::SubjectType;
use async_trait::async_trait;

/// Port for the backing text of content templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Loads the template for one subject type. Returns `Ok(None)` when it does not exist.
    async fn load_template(&self, subject_type: SubjectType) -> AppResult<Option<String>>;
}
