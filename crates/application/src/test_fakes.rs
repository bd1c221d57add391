use std::collections::HashMap;

use apprelay_core::{AppError, AppResult, NonEmptyString};
use apprelay_domain::{
    ApprovalLine, DecisionResult, DirectoryUser, InterfaceStatus, OutboundSubmission,
    PendingApproval, SubjectType, SubmissionReceipt,
};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::relay_ports::{
    DeploymentSettings, DirectoryLookup, SettingsProvider, SubmissionTransport, TemplateStore,
    WorkflowPlatformClient,
};

pub(crate) fn settings() -> DeploymentSettings {
    DeploymentSettings {
        system_id: NonEmptyString::new("BMIL").unwrap_or_else(|_| unreachable!()),
        form_id: NonEmptyString::new("FORM-VDI").unwrap_or_else(|_| unreachable!()),
        sync_cycle_minutes: 5,
    }
}

pub(crate) fn user(id: &str, name: &str, employee_code: Option<&str>) -> DirectoryUser {
    DirectoryUser {
        id: id.to_owned(),
        name: name.to_owned(),
        employee_code: employee_code.map(str::to_owned),
        department_id: None,
        email_address: None,
    }
}

pub(crate) fn reset_approval(
    id: &str,
    requester_id: &str,
    chain: &[(i32, &str)],
) -> PendingApproval {
    PendingApproval {
        id: id.to_owned(),
        subject_type: SubjectType::ResetDesktop.as_tag().to_owned(),
        requester_id: requester_id.to_owned(),
        requester_name: "Requester".to_owned(),
        target_user_id: "target".to_owned(),
        target_user_name: "Target".to_owned(),
        target_user_organization: "Platform".to_owned(),
        reason: "broken image".to_owned(),
        contents: json!({
            "vdName": "vd-07",
            "disk": 80,
            "vdGroupName": "engineering",
            "createDate": "2025-03-01 09:00:00",
            "os": "ubuntu",
            "flavorName": "medium"
        }),
        scheduled_at: None,
        approval_chain: chain
            .iter()
            .map(|(level, approver_id)| ApprovalLine {
                level: *level,
                approver_id: (*approver_id).to_owned(),
            })
            .collect(),
    }
}

#[derive(Default)]
pub(crate) struct FakeTemplateStore {
    pub(crate) templates: HashMap<SubjectType, String>,
    pub(crate) fail: bool,
}

impl FakeTemplateStore {
    pub(crate) fn with_template(mut self, subject_type: SubjectType, text: &str) -> Self {
        self.templates.insert(subject_type, text.to_owned());
        self
    }

    pub(crate) fn with_all_templates() -> Self {
        SubjectType::ALL
            .into_iter()
            .fold(Self::default(), |store, subject_type| {
                store.with_template(subject_type, "<p>{{REASON}}</p>")
            })
    }
}

#[async_trait]
impl TemplateStore for FakeTemplateStore {
    async fn load_template(&self, subject_type: SubjectType) -> AppResult<Option<String>> {
        if self.fail {
            return Err(AppError::Internal("template storage offline".to_owned()));
        }
        Ok(self.templates.get(&subject_type).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub(crate) users: Vec<DirectoryUser>,
    pub(crate) fail: bool,
    pub(crate) id_queries: Mutex<Vec<Vec<String>>>,
    pub(crate) code_queries: Mutex<Vec<Vec<String>>>,
}

impl FakeDirectory {
    pub(crate) fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }
}

#[async_trait]
impl DirectoryLookup for FakeDirectory {
    async fn find_users_by_ids(&self, ids: &[String]) -> AppResult<Vec<DirectoryUser>> {
        self.id_queries.lock().await.push(ids.to_vec());
        if self.fail {
            return Err(AppError::Upstream("directory reported failure".to_owned()));
        }
        Ok(self
            .users
            .iter()
            .filter(|user| ids.iter().any(|id| id.eq_ignore_ascii_case(&user.id)))
            .cloned()
            .collect())
    }

    async fn find_users_by_employee_codes(
        &self,
        employee_codes: &[String],
    ) -> AppResult<Vec<DirectoryUser>> {
        self.code_queries.lock().await.push(employee_codes.to_vec());
        if self.fail {
            return Err(AppError::Upstream("directory reported failure".to_owned()));
        }
        Ok(self
            .users
            .iter()
            .filter(|user| {
                user.employee_code()
                    .is_some_and(|code| employee_codes.iter().any(|wanted| wanted == code))
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeWorkflowPlatform {
    pub(crate) waiting: Vec<PendingApproval>,
    pub(crate) fail_listing: bool,
    pub(crate) fail_posting: bool,
    pub(crate) listing_windows: Mutex<Vec<u32>>,
    pub(crate) posted: Mutex<Vec<DecisionResult>>,
}

#[async_trait]
impl WorkflowPlatformClient for FakeWorkflowPlatform {
    async fn list_waiting_approvals(
        &self,
        within_minutes: u32,
    ) -> AppResult<Vec<PendingApproval>> {
        self.listing_windows.lock().await.push(within_minutes);
        if self.fail_listing {
            return Err(AppError::Upstream("workflow platform unavailable".to_owned()));
        }
        Ok(self.waiting.clone())
    }

    async fn post_decision_result(&self, result: &DecisionResult) -> AppResult<()> {
        if self.fail_posting {
            return Err(AppError::Upstream(
                "process-result responded with 500".to_owned(),
            ));
        }
        self.posted.lock().await.push(result.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    pub(crate) fail: bool,
    pub(crate) batches: Mutex<Vec<Vec<OutboundSubmission>>>,
}

#[async_trait]
impl SubmissionTransport for FakeTransport {
    async fn submit_drafts(
        &self,
        submissions: &[OutboundSubmission],
    ) -> AppResult<Vec<SubmissionReceipt>> {
        if self.fail {
            return Err(AppError::Upstream("legacy endpoint responded with 503".to_owned()));
        }
        self.batches.lock().await.push(submissions.to_vec());
        Ok(submissions
            .iter()
            .map(|_| SubmissionReceipt {
                status: InterfaceStatus::Success,
                message: None,
            })
            .collect())
    }
}

pub(crate) struct FixedSettings(pub(crate) DeploymentSettings);

impl SettingsProvider for FixedSettings {
    fn deployment_settings(&self) -> DeploymentSettings {
        self.0.clone()
    }
}
