use apprelay_core::AppResult;
use apprelay_domain::{OutboundSubmission, SubmissionReceipt};
use async_trait::async_trait;

/// Port for the legacy approval system's draft registration endpoint.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Submits one batch of drafts.
    ///
    /// Returns one receipt per submitted draft in submission order. Any
    /// transport-level failure fails the whole batch.
    async fn submit_drafts(
        &self,
        submissions: &[OutboundSubmission],
    ) -> AppResult<Vec<SubmissionReceipt>>;
}
