use serde::{Deserialize, Serialize};

/// Operation carried by an inbound legacy callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallbackOperation {
    /// Decision status update (`A01`).
    #[serde(rename = "A01")]
    StatusUpdate,
    /// Approval line edit (`A02`). Accepted, never applied.
    #[serde(rename = "A02")]
    ChainEdit,
}

impl CallbackOperation {
    /// Parses a legacy operation code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "A01" => Some(Self::StatusUpdate),
            "A02" => Some(Self::ChainEdit),
            _ => None,
        }
    }
}

/// Decision outcome reported by the legacy approval system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    /// Approved.
    Approve,
    /// Rejected.
    Reject,
    /// Final completion.
    Complete,
    /// Agreement granted.
    Agree,
    /// Agreement refused.
    Disagree,
    /// Consultation concurred.
    #[serde(rename = "OK")]
    Concur,
    /// Consultation objected.
    #[serde(rename = "NO")]
    Object,
    /// Approval cancelled.
    Cancel,
    /// Reviewed.
    Review,
}

impl DecisionOutcome {
    /// Every outcome the relay accepts.
    pub const ALL: [Self; 9] = [
        Self::Approve,
        Self::Reject,
        Self::Complete,
        Self::Agree,
        Self::Disagree,
        Self::Concur,
        Self::Object,
        Self::Cancel,
        Self::Review,
    ];

    /// Returns the legacy wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::Complete => "COMPLETE",
            Self::Agree => "AGREE",
            Self::Disagree => "DISAGREE",
            Self::Concur => "OK",
            Self::Object => "NO",
            Self::Cancel => "CANCEL",
            Self::Review => "REVIEW",
        }
    }

    /// Parses a legacy wire value. Matching is exact.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|outcome| outcome.as_str() == code)
    }
}

/// Raw decision notification received from the legacy approval system.
///
/// Fields are kept as received; validation happens in the status processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionCallback {
    /// Operation code (`A01` or `A02`).
    pub operation: String,
    /// Destination-system identifier.
    pub system_id: String,
    /// Correlation key of the original draft.
    pub correlation_key: String,
    /// Approver employee code, optionally followed by `;delegate`.
    pub approver: String,
    /// Decision outcome code.
    pub outcome: String,
    /// Comment in the UTF-8 field.
    pub comment_utf8: String,
    /// Comment in the EUC-KR field.
    pub comment_euckr: String,
    /// Decision timestamp, `yyyyMMddHHmmss`.
    pub decided_at: String,
    /// Full approval-type line, chain-edit only.
    pub next_approval_types: Option<String>,
    /// Full approver line, chain-edit only.
    pub next_approvers: Option<String>,
}

impl DecisionCallback {
    /// Returns the primary approver. Delegates after `;` are not supported and ignored.
    #[must_use]
    pub fn primary_approver(&self) -> &str {
        self.approver.split(';').next().unwrap_or_default().trim()
    }

    /// Returns the EUC-KR comment when non-empty, else the UTF-8 comment.
    #[must_use]
    pub fn preferred_comment(&self) -> &str {
        if self.comment_euckr.is_empty() {
            self.comment_utf8.as_str()
        } else {
            self.comment_euckr.as_str()
        }
    }
}

/// Decision relayed back to the workflow platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Workflow platform request identifier.
    pub request_id: String,
    /// Resolved approver directory identifier.
    pub approver_id: String,
    /// Resolved approver display name.
    pub approver_name: String,
    /// Decision outcome.
    pub outcome: DecisionOutcome,
    /// Approver comment.
    pub comment: String,
    /// Decision timestamp, `yyyy-MM-dd HH:mm:ss`.
    pub decided_at: String,
}

/// Legacy interface status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceStatus {
    /// `S`.
    #[serde(rename = "S")]
    Success,
    /// `E`.
    #[serde(rename = "E")]
    Error,
}

impl InterfaceStatus {
    /// Returns the single-letter wire code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Success => "S",
            Self::Error => "E",
        }
    }

    /// Parses a wire code. Anything but `S` counts as an error.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("S") {
            Self::Success
        } else {
            Self::Error
        }
    }
}

/// Uniform reply to an inbound callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackResponse {
    /// Success or error flag.
    pub status: InterfaceStatus,
    /// Human-readable message.
    pub message: String,
}

impl CallbackResponse {
    /// Builds a success reply.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: InterfaceStatus::Success,
            message: message.into(),
        }
    }

    /// Builds an error reply.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: InterfaceStatus::Error,
            message: message.into(),
        }
    }

    /// Returns `true` for success replies.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == InterfaceStatus::Success
    }
}
