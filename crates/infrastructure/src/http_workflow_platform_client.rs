use apprelay_application::WorkflowPlatformClient;
use apprelay_core::{AppError, AppResult};
use apprelay_domain::{ApprovalLine, DecisionResult, PendingApproval};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::{require_success, send_logged};
use crate::relay_config::ConfigHandle;

const WAITING_PATH: &str = "/mgmt/api/approval/waiting";
const PROCESS_RESULT_PATH: &str = "/mgmt/api/approval/process-result";

/// Workflow platform client over its management REST API.
pub struct HttpWorkflowPlatformClient {
    http_client: reqwest::Client,
    config: ConfigHandle,
}

impl HttpWorkflowPlatformClient {
    /// Creates a client reading the base URL from `config` on every call.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: ConfigHandle) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl WorkflowPlatformClient for HttpWorkflowPlatformClient {
    async fn list_waiting_approvals(&self, within_minutes: u32) -> AppResult<Vec<PendingApproval>> {
        let mut url = self.config.current().workflow_platform.url(WAITING_PATH)?;
        url.query_pairs_mut()
            .append_pair("beforeMin", &within_minutes.to_string());

        let response = send_logged(self.http_client.get(url.clone()), "GET", url.as_str()).await?;
        let response = require_success(response, "waiting approval query").await?;

        let approvals = response
            .json::<Vec<WaitingApprovalResponse>>()
            .await
            .map_err(|error| {
                AppError::Upstream(format!("failed to decode waiting approvals: {error}"))
            })?;

        Ok(approvals.into_iter().map(PendingApproval::from).collect())
    }

    async fn post_decision_result(&self, result: &DecisionResult) -> AppResult<()> {
        let url = self
            .config
            .current()
            .workflow_platform
            .url(PROCESS_RESULT_PATH)?;
        let body = ProcessResultRequest::from(result);

        let response = send_logged(
            self.http_client.post(url.clone()).json(&body),
            "POST",
            url.as_str(),
        )
        .await?;
        require_success(response, "process result relay").await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaitingApprovalResponse {
    id: String,
    #[serde(rename = "type")]
    subject_type: String,
    applicant: String,
    #[serde(default)]
    applicant_name: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    user_organization: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    contents: Value,
    #[serde(default)]
    job_schedule_date: Option<String>,
    #[serde(default)]
    appr_line: Vec<ApprovalLineResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApprovalLineResponse {
    level: i32,
    approver_id: String,
}

impl From<WaitingApprovalResponse> for PendingApproval {
    fn from(value: WaitingApprovalResponse) -> Self {
        Self {
            id: value.id,
            subject_type: value.subject_type,
            requester_id: value.applicant,
            requester_name: value.applicant_name,
            target_user_id: value.user,
            target_user_name: value.user_name,
            target_user_organization: value.user_organization,
            reason: value.reason,
            contents: value.contents,
            scheduled_at: value.job_schedule_date,
            approval_chain: value
                .appr_line
                .into_iter()
                .map(|line| ApprovalLine {
                    level: line.level,
                    approver_id: line.approver_id,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResultRequest<'a> {
    request_id: &'a str,
    approver_id: &'a str,
    approver_name: &'a str,
    result: &'static str,
    comment: &'a str,
    appr_date: &'a str,
}

impl<'a> From<&'a DecisionResult> for ProcessResultRequest<'a> {
    fn from(value: &'a DecisionResult) -> Self {
        Self {
            request_id: &value.request_id,
            approver_id: &value.approver_id,
            approver_name: &value.approver_name,
            result: value.outcome.as_str(),
            comment: &value.comment,
            appr_date: &value.decided_at,
        }
    }
}
