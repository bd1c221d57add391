use std::time::{Duration, Instant};

use apprelay_core::{AppError, AppResult};
use reqwest::StatusCode;
use tracing::{info, warn};

/// Builds the shared outbound HTTP client.
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))
}

/// Sends a request and logs method, url, status and elapsed time.
pub(crate) async fn send_logged(
    request: reqwest::RequestBuilder,
    method: &'static str,
    url: &str,
) -> AppResult<reqwest::Response> {
    let started = Instant::now();
    let response = request.send().await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match response {
        Ok(response) => {
            info!(
                method,
                url,
                status = response.status().as_u16(),
                elapsed_ms,
                "outbound request completed"
            );
            Ok(response)
        }
        Err(error) => {
            warn!(method, url, elapsed_ms, error = %error, "outbound request failed");
            Err(AppError::Upstream(format!("{method} {url} failed: {error}")))
        }
    }
}

/// Returns the response when its status is 2xx.
///
/// 401 and 403 become `Unauthorized`; any other failure is an upstream error with the body.
pub(crate) async fn require_success(
    response: reqwest::Response,
    operation: &str,
) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    let message = format!("{operation} failed with status {status}: {body}");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AppError::Unauthorized(message));
    }
    Err(AppError::Upstream(message))
}
