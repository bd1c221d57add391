use apprelay_core::AppError;
use apprelay_domain::CallbackResponse;
use apprelay_infrastructure::{parse_status_callback, render_status_response};
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

const INFO_PAGE: &str = r#"<html>
  <head><title>Approval Status SOAP Service</title></head>
  <body>
    <h1>Approval Status SOAP Service</h1>
    <p>The service is running.</p>
    <ul>
      <li><a href="/approval-status?wsdl">WSDL</a></li>
    </ul>
    <h2>A01: approval status update</h2>
    <ul>
      <li>SYSTEM_ID: system id</li>
      <li>APPROVER: approver employee code</li>
      <li>RESULT: APPROVE, REJECT, COMPLETE, AGREE, DISAGREE, OK, NO, CANCEL, REVIEW</li>
      <li>APPR_DATE: yyyyMMddHHmmss</li>
    </ul>
    <h2>A02: approval line update (not supported)</h2>
  </body>
</html>
"#;

/// Handles `processApprovalStatus` SOAP calls. Always answers 200 with an envelope.
pub async fn approval_status_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Response> {
    let parsed = std::str::from_utf8(&body)
        .map_err(|error| AppError::Validation(format!("request body is not utf-8: {error}")))
        .and_then(parse_status_callback);

    let response = match parsed {
        Ok(callback) => state.status_processor.process(&callback).await,
        Err(error) => {
            warn!(error = %error, "failed to parse approval status envelope");
            CallbackResponse::error(error.to_string())
        }
    };

    let namespace = state.config.current().server.namespace.clone();
    let envelope = render_status_response(&response, &namespace)?;

    Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], envelope).into_response())
}

/// Serves the WSDL on `?wsdl`, otherwise a short service page.
pub async fn approval_status_info_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Response> {
    let wants_wsdl = query.as_deref().is_some_and(|query| {
        query.split('&').any(|pair| {
            pair.split('=')
                .next()
                .is_some_and(|key| key.eq_ignore_ascii_case("wsdl"))
        })
    });

    if !wants_wsdl {
        return Ok(Html(INFO_PAGE).into_response());
    }

    let path = state.config.current().server.wsdl_path.clone();
    let wsdl = tokio::fs::read_to_string(&path).await.map_err(|error| {
        warn!(path = %path.display(), error = %error, "failed to read wsdl");
        AppError::NotFound(format!("wsdl document {} is unavailable", path.display()))
    })?;

    Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], wsdl).into_response())
}
