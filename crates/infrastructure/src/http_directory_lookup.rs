use apprelay_application::DirectoryLookup;
use apprelay_core::{AppError, AppResult};
use apprelay_domain::DirectoryUser;
use async_trait::async_trait;
use serde::Deserialize;

use crate::http_client::{require_success, send_logged};
use crate::relay_config::ConfigHandle;

const EMPLOYEE_PATH: &str = "/vshr/employee";

/// Directory lookup backed by the HR employee REST endpoint.
pub struct HttpDirectoryLookup {
    http_client: reqwest::Client,
    config: ConfigHandle,
}

impl HttpDirectoryLookup {
    /// Creates a lookup reading the base URL from `config` on every call.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: ConfigHandle) -> Self {
        Self {
            http_client,
            config,
        }
    }

    async fn find_by(&self, field: &str, values: &[String]) -> AppResult<Vec<DirectoryUser>> {
        let mut url = self.config.current().directory.url(EMPLOYEE_PATH)?;
        let mut filter = serde_json::Map::new();
        filter.insert(field.to_owned(), serde_json::json!(values));
        url.query_pairs_mut()
            .append_pair("filter", &serde_json::Value::Object(filter).to_string());

        let response = send_logged(self.http_client.get(url.clone()), "GET", url.as_str()).await?;
        let response = require_success(response, "directory lookup").await?;

        let payload = response
            .json::<EmployeeListResponse>()
            .await
            .map_err(|error| {
                AppError::Upstream(format!("failed to decode directory response: {error}"))
            })?;

        if !payload.success {
            return Err(AppError::Upstream(format!(
                "directory lookup by {field} reported failure"
            )));
        }

        Ok(payload.data.into_iter().map(DirectoryUser::from).collect())
    }
}

#[async_trait]
impl DirectoryLookup for HttpDirectoryLookup {
    async fn find_users_by_ids(&self, ids: &[String]) -> AppResult<Vec<DirectoryUser>> {
        self.find_by("id", ids).await
    }

    async fn find_users_by_employee_codes(
        &self,
        employee_codes: &[String],
    ) -> AppResult<Vec<DirectoryUser>> {
        self.find_by("empCode", employee_codes).await
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeListResponse {
    success: bool,
    #[serde(default)]
    data: Vec<EmployeeRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeRecord {
    id: String,
    name: String,
    #[serde(default)]
    emp_code: Option<String>,
    #[serde(default)]
    dept_id: Option<String>,
    #[serde(default)]
    email_address: Option<String>,
}

impl From<EmployeeRecord> for DirectoryUser {
    fn from(value: EmployeeRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            employee_code: value.emp_code,
            department_id: value.dept_id,
            email_address: value.email_address,
        }
    }
}
