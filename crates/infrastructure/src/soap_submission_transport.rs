use apprelay_application::SubmissionTransport;
use apprelay_core::{AppError, AppResult};
use apprelay_domain::{OutboundSubmission, SubmissionReceipt};
use async_trait::async_trait;
use tracing::warn;

use crate::http_client::{require_success, send_logged};
use crate::relay_config::ConfigHandle;
use crate::soap_envelope::{parse_registration_response, render_registration_request};

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Draft registration over the legacy SOAP endpoint.
pub struct SoapSubmissionTransport {
    http_client: reqwest::Client,
    config: ConfigHandle,
}

impl SoapSubmissionTransport {
    /// Creates a transport reading endpoint and credentials from `config` on every call.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: ConfigHandle) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl SubmissionTransport for SoapSubmissionTransport {
    async fn submit_drafts(
        &self,
        submissions: &[OutboundSubmission],
    ) -> AppResult<Vec<SubmissionReceipt>> {
        let config = self.config.current();
        let legacy = &config.legacy;
        let envelope = render_registration_request(submissions, &legacy.namespace)?;

        let mut request = self
            .http_client
            .post(legacy.register_endpoint.as_str())
            .header(reqwest::header::CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(envelope);
        if let Some(username) = legacy.username.as_deref() {
            request = request.basic_auth(username, legacy.password.as_deref());
        }
        if let Some(soap_action) = legacy.soap_action.as_deref() {
            request = request.header("SOAPAction", soap_action);
        }

        let response = send_logged(request, "POST", &legacy.register_endpoint).await?;
        let response = require_success(response, "legacy draft registration").await?;
        let body = response.text().await.map_err(|error| {
            AppError::Upstream(format!("failed to read legacy registration reply: {error}"))
        })?;

        let receipts = parse_registration_response(&body)?;
        if receipts.len() != submissions.len() {
            warn!(
                submitted = submissions.len(),
                receipts = receipts.len(),
                "legacy registration reply count differs from batch size"
            );
        }
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests;
