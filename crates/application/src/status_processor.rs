use std::sync::Arc;

use apprelay_core::AppError;
use apprelay_domain::{
    CallbackOperation, CallbackResponse, DecisionCallback, DecisionOutcome, DecisionResult,
    DirectoryUser,
};
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

use crate::relay_ports::{DirectoryLookup, SettingsProvider, WorkflowPlatformClient};

const DECISION_DATE_INPUT: &str = "%Y%m%d%H%M%S";
const DECISION_DATE_OUTPUT: &str = "%Y-%m-%d %H:%M:%S";
const PROCESSED_MESSAGE: &str = "approval status processed";

/// Reasons an inbound callback is answered with an error envelope.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// Operation tag is neither status update nor chain edit.
    #[error("unsupported api type '{0}'")]
    UnsupportedOperation(String),

    /// Outcome is outside the known decision values.
    #[error("unsupported approval result '{0}'")]
    UnsupportedOutcome(String),

    /// Callback addressed to another deployment.
    #[error("system id '{received}' does not match '{expected}'")]
    SystemMismatch {
        /// Identifier carried by the callback.
        received: String,
        /// Identifier configured for this deployment.
        expected: String,
    },

    /// Approver employee code has no directory record.
    #[error("approver '{0}' was not found")]
    ApproverNotFound(String),

    /// Decision timestamp is not `yyyyMMddHHmmss`.
    #[error("invalid approval date '{0}'")]
    InvalidDecisionDate(String),

    /// Approval line edits are accepted but never applied.
    #[error("approval line update is not supported")]
    ChainEditUnsupported,

    /// Workflow platform rejected the decision.
    #[error("failed to relay approval result: {0}")]
    Relay(AppError),
}

/// Handles decision callbacks from the legacy approval system.
///
/// Stateless; safe to call concurrently with itself and with sync cycles.
#[derive(Clone)]
pub struct StatusProcessor {
    directory: Arc<dyn DirectoryLookup>,
    workflow_platform: Arc<dyn WorkflowPlatformClient>,
    settings: Arc<dyn SettingsProvider>,
}

impl StatusProcessor {
    /// Creates a processor from its collaborators.
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryLookup>,
        workflow_platform: Arc<dyn WorkflowPlatformClient>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            directory,
            workflow_platform,
            settings,
        }
    }

    /// Processes one callback and always answers with an envelope.
    pub async fn process(&self, callback: &DecisionCallback) -> CallbackResponse {
        info!(
            operation = %callback.operation,
            system_id = %callback.system_id,
            correlation_key = %callback.correlation_key,
            "received approval status callback"
        );

        match self.handle(callback).await {
            Ok(()) => CallbackResponse::success(PROCESSED_MESSAGE),
            Err(error) => {
                warn!(
                    correlation_key = %callback.correlation_key,
                    error = %error,
                    "rejected approval status callback"
                );
                CallbackResponse::error(error.to_string())
            }
        }
    }

    async fn handle(&self, callback: &DecisionCallback) -> Result<(), CallbackError> {
        let operation = CallbackOperation::from_code(&callback.operation)
            .ok_or_else(|| CallbackError::UnsupportedOperation(callback.operation.clone()))?;

        let outcome = match operation {
            CallbackOperation::StatusUpdate => Some(
                DecisionOutcome::from_code(&callback.outcome)
                    .ok_or_else(|| CallbackError::UnsupportedOutcome(callback.outcome.clone()))?,
            ),
            CallbackOperation::ChainEdit => None,
        };

        let settings = self.settings.deployment_settings();
        if callback.system_id != settings.system_id.as_str() {
            return Err(CallbackError::SystemMismatch {
                received: callback.system_id.clone(),
                expected: settings.system_id.as_str().to_owned(),
            });
        }

        match outcome {
            Some(outcome) => self.relay_decision(callback, outcome).await,
            None => Err(CallbackError::ChainEditUnsupported),
        }
    }

    async fn relay_decision(
        &self,
        callback: &DecisionCallback,
        outcome: DecisionOutcome,
    ) -> Result<(), CallbackError> {
        let approver_code = callback.primary_approver();
        let approver = self.find_approver(approver_code).await?;
        let decided_at = reformat_decision_date(&callback.decided_at)?;

        let result = DecisionResult {
            request_id: callback.correlation_key.clone(),
            approver_id: approver.id,
            approver_name: approver.name,
            outcome,
            comment: callback.preferred_comment().to_owned(),
            decided_at,
        };

        self.workflow_platform
            .post_decision_result(&result)
            .await
            .map_err(CallbackError::Relay)?;

        info!(
            correlation_key = %result.request_id,
            outcome = result.outcome.as_str(),
            "relayed approval result"
        );
        Ok(())
    }

    async fn find_approver(&self, employee_code: &str) -> Result<DirectoryUser, CallbackError> {
        let not_found = || CallbackError::ApproverNotFound(employee_code.to_owned());

        let users = self
            .directory
            .find_users_by_employee_codes(&[employee_code.to_owned()])
            .await
            .map_err(|error| {
                warn!(employee_code = %employee_code, error = %error, "approver lookup failed");
                not_found()
            })?;

        let position = users
            .iter()
            .position(|user| {
                user.employee_code()
                    .is_some_and(|code| code.eq_ignore_ascii_case(employee_code))
            })
            .unwrap_or(0);

        users.into_iter().nth(position).ok_or_else(not_found)
    }
}

fn reformat_decision_date(raw: &str) -> Result<String, CallbackError> {
    let invalid = || CallbackError::InvalidDecisionDate(raw.to_owned());

    if raw.len() != 14 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(raw, DECISION_DATE_INPUT)
        .map(|value| value.format(DECISION_DATE_OUTPUT).to_string())
        .map_err(|_| invalid())
}
