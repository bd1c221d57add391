use std::collections::HashSet;
use std::sync::Arc;

use apprelay_core::AppResult;
use apprelay_domain::{InterfaceStatus, PendingApproval, SubmissionReceipt, UserDirectory};
use tracing::{info, warn};

use crate::relay_ports::{
    DeploymentSettings, DirectoryLookup, SubmissionTransport, WorkflowPlatformClient,
};
use crate::request_builder::RequestBuilder;

mod scheduler;

pub use scheduler::SyncScheduler;

/// Approval left out of a cycle's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedApproval {
    /// Identifier of the dropped approval.
    pub approval_id: String,
    /// Build error message.
    pub reason: String,
}

/// Outcome of one completed sync cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncCycleReport {
    /// Number of approvals returned by discovery.
    pub discovered: usize,
    /// Number of drafts handed to the transport.
    pub submitted: usize,
    /// Approvals whose draft could not be built.
    pub dropped: Vec<DroppedApproval>,
    /// Legacy receipts in submission order.
    pub receipts: Vec<SubmissionReceipt>,
}

/// Runs discovery, enrichment, draft construction and submission once.
#[derive(Clone)]
pub struct SyncCycleService {
    workflow_platform: Arc<dyn WorkflowPlatformClient>,
    directory: Arc<dyn DirectoryLookup>,
    transport: Arc<dyn SubmissionTransport>,
    request_builder: RequestBuilder,
}

impl SyncCycleService {
    /// Creates the cycle service from its collaborators.
    #[must_use]
    pub fn new(
        workflow_platform: Arc<dyn WorkflowPlatformClient>,
        directory: Arc<dyn DirectoryLookup>,
        transport: Arc<dyn SubmissionTransport>,
        request_builder: RequestBuilder,
    ) -> Self {
        Self {
            workflow_platform,
            directory,
            transport,
            request_builder,
        }
    }

    /// Runs one cycle against a settings snapshot.
    ///
    /// Directory, discovery and transport failures end the cycle with an
    /// error. Build failures only drop the affected approval.
    pub async fn run_cycle(&self, settings: &DeploymentSettings) -> AppResult<SyncCycleReport> {
        let approvals = self
            .workflow_platform
            .list_waiting_approvals(settings.sync_cycle_minutes)
            .await?;

        if approvals.is_empty() {
            info!(
                within_minutes = settings.sync_cycle_minutes,
                "no approvals waiting for sync"
            );
            return Ok(SyncCycleReport::default());
        }

        info!(count = approvals.len(), "discovered waiting approvals");

        let ids = referenced_user_ids(&approvals);
        let directory = UserDirectory::from_users(self.directory.find_users_by_ids(&ids).await?);

        let mut submissions = Vec::with_capacity(approvals.len());
        let mut dropped = Vec::new();
        for approval in &approvals {
            match self
                .request_builder
                .build(approval, &directory, settings)
                .await
            {
                Ok(submission) => submissions.push(submission),
                Err(error) => {
                    warn!(
                        approval_id = %approval.id,
                        error = %error,
                        "failed to build approval draft"
                    );
                    dropped.push(DroppedApproval {
                        approval_id: approval.id.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let mut report = SyncCycleReport {
            discovered: approvals.len(),
            submitted: submissions.len(),
            dropped,
            receipts: Vec::new(),
        };

        if submissions.is_empty() {
            info!(
                dropped = report.dropped.len(),
                "no approval drafts left to submit"
            );
            return Ok(report);
        }

        report.receipts = self.transport.submit_drafts(&submissions).await?;

        for (submission, receipt) in submissions.iter().zip(&report.receipts) {
            if receipt.status == InterfaceStatus::Error {
                warn!(
                    approval_id = %submission.correlation_key,
                    message = receipt.message.as_deref().unwrap_or_default(),
                    "legacy system rejected approval draft"
                );
            }
        }

        info!(
            submitted = report.submitted,
            dropped = report.dropped.len(),
            "submitted approval drafts"
        );

        Ok(report)
    }
}

fn referenced_user_ids(approvals: &[PendingApproval]) -> Vec<String> {
    let mut seen = HashSet::new();
    approvals
        .iter()
        .flat_map(|approval| approval.referenced_user_ids())
        .filter(|id| seen.insert(*id))
        .map(str::to_owned)
        .collect()
}
