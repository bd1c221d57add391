use apprelay_core::AppResult;
use apprelay_domain::{DecisionResult, PendingApproval};
use async_trait::async_trait;

/// Port for the workflow platform that owns approval requests.
#[async_trait]
pub trait WorkflowPlatformClient: Send + Sync {
    /// Lists approvals that became ready for sync within the last `within_minutes` minutes.
    async fn list_waiting_approvals(&self, within_minutes: u32) -> AppResult<Vec<PendingApproval>>;

    /// Posts one final decision. A non-success response is an error.
    async fn post_decision_result(&self, result: &DecisionResult) -> AppResult<()>;
}
