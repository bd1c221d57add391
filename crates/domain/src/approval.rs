use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directory::same_identifier;

/// One member of an approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalLine {
    /// Position in the chain. Strictly increasing, not required to start at 1.
    pub level: i32,
    /// Directory identifier of the approver.
    pub approver_id: String,
}

/// Approval discovered on the workflow platform and awaiting submission to the legacy system.
///
/// The record is a read-only snapshot for the duration of one sync cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Workflow platform request identifier, used as the legacy correlation key.
    pub id: String,
    /// Raw subject-type tag as published by the workflow platform.
    pub subject_type: String,
    /// Directory identifier of the requester.
    pub requester_id: String,
    /// Display name of the requester.
    pub requester_name: String,
    /// Directory identifier of the user the request is about.
    pub target_user_id: String,
    /// Display name of the target user.
    pub target_user_name: String,
    /// Organization of the target user.
    pub target_user_organization: String,
    /// Free-text justification.
    pub reason: String,
    /// Subject-type specific payload, interpreted by [`crate::ApprovalSubject::parse`].
    pub contents: Value,
    /// Optional scheduled-execution timestamp.
    pub scheduled_at: Option<String>,
    /// Approval chain in discovery order.
    pub approval_chain: Vec<ApprovalLine>,
}

impl PendingApproval {
    /// Returns the approval chain ordered by ascending level.
    #[must_use]
    pub fn sorted_chain(&self) -> Vec<&ApprovalLine> {
        let mut chain: Vec<&ApprovalLine> = self.approval_chain.iter().collect();
        chain.sort_by_key(|line| line.level);
        chain
    }

    /// Returns `true` when the first approver in level order is the requester.
    #[must_use]
    pub fn is_self_approved(&self) -> bool {
        self.sorted_chain()
            .first()
            .is_some_and(|line| same_identifier(&line.approver_id, &self.requester_id))
    }

    /// Returns every directory identifier this approval needs resolved.
    pub fn referenced_user_ids(&self) -> impl Iterator<Item = &str> {
        self.approval_chain
            .iter()
            .map(|line| line.approver_id.as_str())
            .chain(std::iter::once(self.requester_id.as_str()))
    }

    /// Formats the target user as `id/name/organization`.
    #[must_use]
    pub fn target_user_label(&self) -> String {
        format!(
            "{}/{}/{}",
            self.target_user_id, self.target_user_name, self.target_user_organization
        )
    }
}
