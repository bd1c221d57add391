use apprelay_domain::{ApprovalType, OutboundSubmission, PendingApproval, UserDirectory};
use thiserror::Error;

use crate::content_renderer::{ContentRenderer, RenderError};
use crate::relay_ports::DeploymentSettings;

/// Reasons one pending approval cannot be turned into a draft.
///
/// These never abort a cycle; the approval is dropped and rediscovered later.
#[derive(Debug, Error)]
pub enum SubmissionBuildError {
    /// A referenced identifier has no directory record.
    #[error("user '{0}' was not found in the directory")]
    UnresolvedUser(String),

    /// A directory record exists but carries no employee code.
    #[error("user '{0}' has no employee code")]
    MissingEmployeeCode(String),

    /// Subject-type tag outside the supported set.
    #[error("unsupported approval type '{0}'")]
    UnsupportedSubjectType(String),

    /// Template file for the subject type is absent.
    #[error("template for '{0}' does not exist")]
    TemplateNotFound(&'static str),

    /// Subject payload does not match its type.
    #[error("{0}")]
    InvalidPayload(String),

    /// Template store failed.
    #[error("{0}")]
    TemplateUnreadable(String),
}

impl From<RenderError> for SubmissionBuildError {
    fn from(value: RenderError) -> Self {
        match value {
            RenderError::UnsupportedTemplate(tag) => Self::UnsupportedSubjectType(tag),
            RenderError::TemplateNotFound(tag) => Self::TemplateNotFound(tag),
            RenderError::InvalidPayload(message) => Self::InvalidPayload(message),
            RenderError::TemplateUnreadable(error) => Self::TemplateUnreadable(error.to_string()),
        }
    }
}

/// Builds legacy drafts from pending approvals.
#[derive(Clone)]
pub struct RequestBuilder {
    renderer: ContentRenderer,
}

impl RequestBuilder {
    /// Creates a builder rendering bodies with `renderer`.
    #[must_use]
    pub fn new(renderer: ContentRenderer) -> Self {
        Self { renderer }
    }

    /// Builds the draft for one approval against an already resolved directory batch.
    pub async fn build(
        &self,
        approval: &PendingApproval,
        directory: &UserDirectory,
        settings: &DeploymentSettings,
    ) -> Result<OutboundSubmission, SubmissionBuildError> {
        let chain = approval.sorted_chain();

        let approver_codes = chain
            .iter()
            .map(|line| employee_code(directory, &line.approver_id))
            .collect::<Result<Vec<_>, _>>()?;
        let requester_code = employee_code(directory, &approval.requester_id)?;

        let self_approved = approval.is_self_approved();
        let approval_types = (0..chain.len())
            .map(|position| {
                if position == 0 && self_approved {
                    ApprovalType::SelfApproval
                } else {
                    ApprovalType::Approval
                }
            })
            .collect();

        let content = self.renderer.render(approval).await?;

        Ok(OutboundSubmission {
            correlation_key: approval.id.clone(),
            system_id: settings.system_id.as_str().to_owned(),
            form_id: settings.form_id.as_str().to_owned(),
            title: approval.subject_type.clone(),
            requester_code,
            content,
            approval_types,
            approver_codes,
        })
    }
}

fn employee_code(directory: &UserDirectory, id: &str) -> Result<String, SubmissionBuildError> {
    let user = directory
        .find(id)
        .ok_or_else(|| SubmissionBuildError::UnresolvedUser(id.to_owned()))?;

    user.employee_code()
        .map(str::to_owned)
        .ok_or_else(|| SubmissionBuildError::MissingEmployeeCode(id.to_owned()))
}
