use apprelay_application::SubmissionTransport;
use apprelay_core::AppError;
use apprelay_domain::{ApprovalType, InterfaceStatus, OutboundSubmission};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_support::sample_handle;

use super::SoapSubmissionTransport;

fn transport(server: &MockServer) -> SoapSubmissionTransport {
    SoapSubmissionTransport::new(
        reqwest::Client::new(),
        sample_handle(&server.uri(), &std::env::temp_dir()),
    )
}

fn submission() -> OutboundSubmission {
    OutboundSubmission {
        correlation_key: "REQ-1".to_owned(),
        system_id: "BMIL".to_owned(),
        form_id: "FORM-VDI".to_owned(),
        title: "approval.types.delete-vd".to_owned(),
        requester_code: "FP0001".to_owned(),
        content: "<p>delete</p>".to_owned(),
        approval_types: vec![ApprovalType::Approval],
        approver_codes: vec!["FP0002".to_owned()],
    }
}

const ACCEPTED: &str = r#"<SOAP:Envelope xmlns:SOAP="http://schemas.xmlsoap.org/soap/envelope/"><SOAP:Body>
<ns0:MT_LGCY_APRV_EA_TOTALAPRV_03_S_response xmlns:ns0="urn:legacy">
<requestAutoResponse><IF_STATUS>S</IF_STATUS></requestAutoResponse>
</ns0:MT_LGCY_APRV_EA_TOTALAPRV_03_S_response></SOAP:Body></SOAP:Envelope>"#;

#[tokio::test]
async fn posts_envelope_with_auth_and_soap_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/legacy/register"))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(header("SOAPAction", "http://sap.com/xi/WebService/soap1.1"))
        .and(header_exists("authorization"))
        .and(body_string_contains("<APPKEY_01>REQ-1</APPKEY_01>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCEPTED))
        .expect(1)
        .mount(&server)
        .await;

    let receipts = transport(&server).submit_drafts(&[submission()]).await;

    assert!(receipts.is_ok());
    let receipts = receipts.unwrap_or_else(|_| unreachable!());
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].status, InterfaceStatus::Success);
}

#[tokio::test]
async fn non_success_status_fails_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/legacy/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("gateway down"))
        .mount(&server)
        .await;

    let receipts = transport(&server).submit_drafts(&[submission()]).await;

    assert!(receipts.is_err_and(|error| error.to_string().contains("gateway down")));
}

#[tokio::test]
async fn rejected_credentials_are_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/legacy/register"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let receipts = transport(&server).submit_drafts(&[submission()]).await;

    assert!(matches!(
        receipts,
        Err(AppError::Unauthorized(ref message)) if message.contains("bad credentials")
    ));
}

#[tokio::test]
async fn soap_fault_fails_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/legacy/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<e:Envelope xmlns:e="http://schemas.xmlsoap.org/soap/envelope/"><e:Body><e:Fault><faultstring>denied</faultstring></e:Fault></e:Body></e:Envelope>"#,
        ))
        .mount(&server)
        .await;

    let receipts = transport(&server).submit_drafts(&[submission()]).await;

    assert!(receipts.is_err());
}
