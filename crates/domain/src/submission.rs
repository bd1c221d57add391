use serde::{Deserialize, Serialize};

use crate::decision::InterfaceStatus;

/// Security classification sent with every draft. `0` is the unrestricted level.
pub const APPROVAL_SECURITY_TYPE: &str = "0";

/// Legacy approval-line entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    /// Standard approval.
    Approval,
    /// Mandatory consultation.
    ConsultRequired,
    /// Optional consultation.
    ConsultOptional,
    /// Agreement.
    Agree,
    /// Report only.
    Report,
    /// Investment officer.
    Investment,
    /// Requester approves their own request.
    SelfApproval,
    /// Parallel agreement.
    ParallelAgree,
}

impl ApprovalType {
    /// Returns the legacy wire code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Approval => "0",
            Self::ConsultRequired => "1",
            Self::ConsultOptional => "2",
            Self::Agree => "6",
            Self::Report => "7",
            Self::Investment => "8",
            Self::SelfApproval => "9",
            Self::ParallelAgree => "10",
        }
    }
}

/// Draft sent to the legacy approval system for one pending approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundSubmission {
    /// Correlation key, equal to the pending approval identifier.
    pub correlation_key: String,
    /// Destination-system identifier of this deployment.
    pub system_id: String,
    /// Legacy form identifier.
    pub form_id: String,
    /// Draft title, equal to the subject-type tag.
    pub title: String,
    /// Requester employee code.
    pub requester_code: String,
    /// Rendered HTML body.
    pub content: String,
    /// One entry per chain member, in ascending level order.
    pub approval_types: Vec<ApprovalType>,
    /// Approver employee codes aligned positionally with `approval_types`.
    pub approver_codes: Vec<String>,
}

impl OutboundSubmission {
    /// Returns approval-type codes joined with `;`.
    #[must_use]
    pub fn approval_types_joined(&self) -> String {
        self.approval_types
            .iter()
            .map(|approval_type| approval_type.code())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Returns approver employee codes joined with `;`.
    #[must_use]
    pub fn approver_codes_joined(&self) -> String {
        self.approver_codes.join(";")
    }
}

/// Legacy acknowledgement for one submitted draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Interface status reported by the legacy system.
    pub status: InterfaceStatus,
    /// Optional legacy error message.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{ApprovalType, OutboundSubmission};

    #[test]
    fn joins_parallel_sequences_with_semicolons() {
        let submission = OutboundSubmission {
            correlation_key: "REQ-1".to_owned(),
            system_id: "BMIL".to_owned(),
            form_id: "FORM-1".to_owned(),
            title: "approval.types.reset-vd".to_owned(),
            requester_code: "FP0001".to_owned(),
            content: "<html/>".to_owned(),
            approval_types: vec![ApprovalType::SelfApproval, ApprovalType::Approval],
            approver_codes: vec!["FP0001".to_owned(), "FP0002".to_owned()],
        };

        assert_eq!(submission.approval_types_joined(), "9;0");
        assert_eq!(submission.approver_codes_joined(), "FP0001;FP0002");
    }

    #[test]
    fn parallel_agree_uses_two_digit_code() {
        assert_eq!(ApprovalType::ParallelAgree.code(), "10");
    }
}
