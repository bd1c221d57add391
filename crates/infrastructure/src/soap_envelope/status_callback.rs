use apprelay_core::{AppError, AppResult};
use apprelay_domain::{CallbackResponse, DecisionCallback};

use super::write_envelope;
use super::xml_tree::{XmlElement, parse_document};

const RESPONSE_ELEMENT: &str = "processApprovalStatusResponse";

/// Extracts a decision callback from an inbound `processApprovalStatus` envelope.
///
/// Missing fields decode as empty strings and are rejected later by validation.
pub fn parse_status_callback(xml: &str) -> AppResult<DecisionCallback> {
    let envelope = parse_document(xml)?;
    let body = envelope
        .child("Body")
        .ok_or_else(|| AppError::Validation("request has no soap body".to_owned()))?;
    let request = body
        .find_containing("API_TYPE")
        .ok_or_else(|| AppError::Validation("request has no API_TYPE element".to_owned()))?;

    let text = |name: &str| field(request, name).unwrap_or_default().to_owned();

    Ok(DecisionCallback {
        operation: text("API_TYPE"),
        system_id: text("SYSTEM_ID"),
        correlation_key: text("APPKEY_01"),
        approver: text("APPROVER"),
        outcome: text("RESULT"),
        comment_utf8: text("COMMENT_UTF8"),
        comment_euckr: text("COMMENT_EUCKR"),
        decided_at: text("APPR_DATE"),
        next_approval_types: field(request, "NEXT_APPR_TYPE").map(str::to_owned),
        next_approvers: field(request, "NEXT_APPROVER").map(str::to_owned),
    })
}

fn field<'a>(request: &'a XmlElement, name: &str) -> Option<&'a str> {
    request.child_text(name).filter(|value| !value.is_empty())
}

/// Renders the uniform `{IF_STATUS, IF_ERRMSG}` reply envelope.
pub fn render_status_response(response: &CallbackResponse, namespace: &str) -> AppResult<String> {
    write_envelope(namespace, |writer| {
        writer.open_qualified(RESPONSE_ELEMENT)?;
        writer.text_element("IF_STATUS", response.status.code())?;
        writer.text_element("IF_ERRMSG", &response.message)?;
        writer.close_qualified(RESPONSE_ELEMENT)
    })
}
