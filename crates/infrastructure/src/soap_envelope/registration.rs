use apprelay_core::{AppError, AppResult};
use apprelay_domain::{
    APPROVAL_SECURITY_TYPE, InterfaceStatus, OutboundSubmission, SubmissionReceipt,
};

use super::xml_tree::parse_document;
use super::{EnvelopeWriter, write_envelope};

const REQUEST_ELEMENT: &str = "MT_LGCY_APRV_EA_TOTALAPRV_03_S";
const ITEM_ELEMENT: &str = "requestAuto";
const RESPONSE_ITEM_ELEMENT: &str = "requestAutoResponse";

/// Renders the draft registration envelope for one batch.
pub fn render_registration_request(
    submissions: &[OutboundSubmission],
    namespace: &str,
) -> AppResult<String> {
    write_envelope(namespace, |writer| {
        writer.open_qualified(REQUEST_ELEMENT)?;
        for submission in submissions {
            write_item(writer, submission)?;
        }
        writer.close_qualified(REQUEST_ELEMENT)
    })
}

fn write_item(writer: &mut EnvelopeWriter, submission: &OutboundSubmission) -> AppResult<()> {
    writer.open(ITEM_ELEMENT)?;
    for (name, value) in [
        ("SYSTEM_ID", submission.system_id.as_str()),
        ("FORM_ID", submission.form_id.as_str()),
        ("APPR_TITLE", submission.title.as_str()),
        ("REQ_USER", submission.requester_code.as_str()),
        ("APPKEY_01", submission.correlation_key.as_str()),
        ("APPR_SECURITY_TYPE", APPROVAL_SECURITY_TYPE),
        ("NEXT_APPR_TYPE", submission.approval_types_joined().as_str()),
        ("NEXT_APPROVER", submission.approver_codes_joined().as_str()),
        ("FORM_EDITOR_DATA", submission.content.as_str()),
    ] {
        writer.text_element(name, value)?;
    }
    writer.close(ITEM_ELEMENT)
}

/// Parses the registration reply into per-draft receipts in document order.
///
/// A SOAP fault fails the whole batch.
pub fn parse_registration_response(xml: &str) -> AppResult<Vec<SubmissionReceipt>> {
    let envelope = parse_document(xml)?;
    let body = envelope
        .child("Body")
        .ok_or_else(|| AppError::Upstream("registration reply has no soap body".to_owned()))?;

    if let Some(fault) = body.find("Fault") {
        let reason = fault
            .child_text("faultstring")
            .filter(|reason| !reason.is_empty())
            .unwrap_or("unspecified fault");
        return Err(AppError::Upstream(format!(
            "legacy registration returned a soap fault: {reason}"
        )));
    }

    Ok(body
        .descendants(RESPONSE_ITEM_ELEMENT)
        .into_iter()
        .map(|item| SubmissionReceipt {
            status: InterfaceStatus::from_code(item.child_text("IF_STATUS").unwrap_or_default()),
            message: item
                .child_text("IF_ERRMSG")
                .filter(|message| !message.is_empty())
                .map(str::to_owned),
        })
        .collect())
}
