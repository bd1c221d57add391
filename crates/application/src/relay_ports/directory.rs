use apprelay_core::AppResult;
use apprelay_domain::DirectoryUser;
use async_trait::async_trait;

/// Port for the organizational directory.
///
/// A failed call and a partially empty answer are indistinguishable to callers:
/// the adapter returns an error whenever the directory reports `success = false`.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Resolves users by internal identifier in one batched call.
    async fn find_users_by_ids(&self, ids: &[String]) -> AppResult<Vec<DirectoryUser>>;

    /// Resolves users by enterprise employee code in one batched call.
    async fn find_users_by_employee_codes(
        &self,
        employee_codes: &[String],
    ) -> AppResult<Vec<DirectoryUser>>;
}
