//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod approval;
mod decision;
mod directory;
mod subject;
mod submission;

pub use approval::{ApprovalLine, PendingApproval};
pub use decision::{
    CallbackOperation, CallbackResponse, DecisionCallback, DecisionOutcome, DecisionResult,
    InterfaceStatus,
};
pub use directory::{DirectoryUser, UserDirectory};
pub use subject::{
    ApprovalSubject, CreateDesktopContents, DesktopContents, ExternalAccessContents, SubjectType,
};
pub use submission::{APPROVAL_SECURITY_TYPE, ApprovalType, OutboundSubmission, SubmissionReceipt};
