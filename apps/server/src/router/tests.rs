use std::path::Path;
use std::sync::Arc;

use apprelay_application::{DirectoryLookup, StatusProcessor, WorkflowPlatformClient};
use apprelay_core::{AppError, AppResult};
use apprelay_domain::{DecisionResult, DirectoryUser, PendingApproval};
use apprelay_infrastructure::{ConfigHandle, RelayConfig};
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use tokio::sync::Mutex;
use tower::ServiceExt;

use super::build_router;
use crate::state::AppState;

struct StaticDirectory;

#[async_trait]
impl DirectoryLookup for StaticDirectory {
    async fn find_users_by_ids(&self, _ids: &[String]) -> AppResult<Vec<DirectoryUser>> {
        Ok(Vec::new())
    }

    async fn find_users_by_employee_codes(
        &self,
        employee_codes: &[String],
    ) -> AppResult<Vec<DirectoryUser>> {
        Ok(employee_codes
            .iter()
            .filter(|code| code.as_str() == "FP508391")
            .map(|code| DirectoryUser {
                id: "u-100".to_owned(),
                name: "Kim Approver".to_owned(),
                employee_code: Some(code.clone()),
                department_id: None,
                email_address: None,
            })
            .collect())
    }
}

#[derive(Default)]
struct RecordingPlatform {
    posted: Mutex<Vec<DecisionResult>>,
}

#[async_trait]
impl WorkflowPlatformClient for RecordingPlatform {
    async fn list_waiting_approvals(
        &self,
        _within_minutes: u32,
    ) -> AppResult<Vec<PendingApproval>> {
        Err(AppError::Internal("not used by the router".to_owned()))
    }

    async fn post_decision_result(&self, result: &DecisionResult) -> AppResult<()> {
        self.posted.lock().await.push(result.clone());
        Ok(())
    }
}

fn config_handle(wsdl_path: &Path) -> ConfigHandle {
    let yaml = format!(
        r#"
system:
  system_id: BMIL
  form_id: FORM-VDI
server:
  port: 8088
  wsdl_path: {}
sync:
  cycle_minutes: 5
workflow_platform:
  base_url: http://127.0.0.1:9
directory:
  base_url: http://127.0.0.1:9
legacy:
  register_endpoint: http://127.0.0.1:9/register
  namespace: http://legacy.example.com/approval
templates:
  directory: ./templates
"#,
        wsdl_path.display()
    );
    let config = RelayConfig::from_yaml_str(&yaml)
        .unwrap_or_else(|error| panic!("test config must be valid: {error}"));
    ConfigHandle::new(config)
}

fn test_state(wsdl_path: &Path) -> (AppState, Arc<RecordingPlatform>) {
    let config = config_handle(wsdl_path);
    let platform = Arc::new(RecordingPlatform::default());
    let state = AppState {
        status_processor: StatusProcessor::new(
            Arc::new(StaticDirectory),
            platform.clone(),
            Arc::new(config.clone()),
        ),
        config,
    };
    (state, platform)
}

fn callback_envelope(system_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns="urn:approval-status">
  <soapenv:Header/>
  <soapenv:Body>
    <ns:processApprovalStatus>
      <API_TYPE>A01</API_TYPE>
      <SYSTEM_ID>{system_id}</SYSTEM_ID>
      <APPKEY_01>REQ-42</APPKEY_01>
      <APPROVER>FP508391</APPROVER>
      <RESULT>APPROVE</RESULT>
      <COMMENT_UTF8>looks good</COMMENT_UTF8>
      <APPR_DATE>20261014093005</APPR_DATE>
    </ns:processApprovalStatus>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| unreachable!());
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| unreachable!())
}

fn post_status(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/approval-status")
        .header(CONTENT_TYPE, "text/xml; charset=utf-8")
        .body(body.into())
        .unwrap_or_else(|_| unreachable!())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, _) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state).oneshot(get("/health")).await;

    assert!(response.is_ok());
    let response = response.unwrap_or_else(|_| unreachable!());
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_str(&body_text(response).await).unwrap_or_else(|_| unreachable!());
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn valid_callback_is_relayed_and_acknowledged() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, platform) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state)
        .oneshot(post_status(callback_envelope("BMIL")))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
        Some("text/xml; charset=utf-8")
    );
    let body = body_text(response).await;
    assert!(body.contains("<IF_STATUS>S</IF_STATUS>"));
    assert!(body.contains("processApprovalStatusResponse"));

    let posted = platform.posted.lock().await;
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].request_id, "REQ-42");
    assert_eq!(posted[0].approver_id, "u-100");
}

#[tokio::test]
async fn mismatched_system_gets_error_envelope() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, platform) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state)
        .oneshot(post_status(callback_envelope("OTHER")))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<IF_STATUS>E</IF_STATUS>"));
    assert!(body.contains("OTHER"));
    assert!(platform.posted.lock().await.is_empty());
}

#[tokio::test]
async fn malformed_body_gets_error_envelope() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, platform) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state)
        .oneshot(post_status("definitely not xml <".to_owned()))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<IF_STATUS>E</IF_STATUS>"));
    assert!(platform.posted.lock().await.is_empty());
}

#[tokio::test]
async fn non_utf8_body_gets_error_envelope() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, platform) = test_state(&dir.path().join("missing.wsdl"));
    let envelope = callback_envelope("BMIL");
    let (head, tail) = envelope
        .split_once("looks good")
        .unwrap_or_else(|| unreachable!());
    let mut body = head.as_bytes().to_vec();
    body.extend_from_slice(&[0xC8, 0xAE, 0xC0, 0xCE]);
    body.extend_from_slice(tail.as_bytes());

    let response = build_router(state)
        .oneshot(post_status(body))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(text.contains("<IF_STATUS>E</IF_STATUS>"));
    assert!(text.contains("utf-8"));
    assert!(platform.posted.lock().await.is_empty());
}

#[tokio::test]
async fn wsdl_query_serves_configured_document() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let wsdl_path = dir.path().join("approval_status.wsdl");
    std::fs::write(&wsdl_path, "<definitions name=\"ApprovalStatus\"/>")
        .unwrap_or_else(|_| unreachable!());
    let (state, _) = test_state(&wsdl_path);

    let response = build_router(state)
        .oneshot(get("/approval-status?wsdl"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "<definitions name=\"ApprovalStatus\"/>"
    );
}

#[tokio::test]
async fn missing_wsdl_is_not_found() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, _) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state)
        .oneshot(get("/approval-status?wsdl"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn plain_get_serves_info_page() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let (state, _) = test_state(&dir.path().join("missing.wsdl"));

    let response = build_router(state)
        .oneshot(get("/approval-status"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Approval Status SOAP Service"));
    assert!(body.contains("?wsdl"));
}
