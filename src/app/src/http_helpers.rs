//! HTTP helper functions for Crux Core
//!
//! Response handling shared by the status and settings handlers, kept out of
//! macros so it can be read and debugged on its own.

use crux_http::{http::StatusCode, HttpError, Response};

/// Base URL for device endpoints.
///
/// `crux_http` requires absolute URLs and rejects relative paths
/// (`RelativeUrlWithoutBase`). Shells strip this prefix and resolve the
/// remaining path against the device they talk to.
pub const BASE_URL: &str = "https://relative";

/// Status and configuration endpoint
pub const STATUS_ENDPOINT: &str = "/status";

/// Configuration update endpoint
pub const UPDATE_ENDPOINT: &str = "/update";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use panel_sync_core::http_helpers::build_url;
/// let url = build_url("/status");
/// assert_eq!(url, "https://relative/status");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Extracts error message from HTTP response.
pub fn extract_error_message(action: &str, response: &mut Response<Vec<u8>>) -> String {
    describe_failure(action, response.status(), response.take_body())
}

/// Format a non-2xx reply, keeping whatever the device wrote in the body
fn describe_failure(action: &str, status: StatusCode, body: Option<Vec<u8>>) -> String {
    match body {
        Some(body) => {
            if body.is_empty() {
                format!("{action} failed: HTTP {status} (Empty body)")
            } else {
                match String::from_utf8(body) {
                    Ok(msg) => format!("{action} failed: HTTP {status}: {msg}"),
                    Err(e) => format!("{action} failed: HTTP {status} (Invalid UTF-8: {e})"),
                }
            }
        }
        None => format!("{action} failed: HTTP {status} (No body)"),
    }
}

/// Extract string body from response.
///
/// The status endpoint body is kept as text so it can be logged verbatim
/// before parsing; the update endpoint answers with plain text.
pub fn extract_string_response(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<String, String> {
    if !is_response_success(response) {
        return Err(extract_error_message(action, response));
    }

    match response.take_body() {
        Some(bytes) => {
            String::from_utf8(bytes).map_err(|_| format!("{action}: Invalid UTF-8 in response"))
        }
        None => Ok(String::new()),
    }
}

/// Describe a failed request.
///
/// `crux_http` turns 4xx/5xx replies into `HttpError::Http` before the
/// response event sees them, so the body is recovered from the error here.
pub fn map_http_error(action: &str, error: HttpError) -> String {
    match error {
        HttpError::Http { code, body, .. } => describe_failure(action, code, body),
        other => format!("{action} failed: {other}"),
    }
}

/// Process HTTP response result and extract the body as text
pub fn process_text_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<String, String> {
    match result {
        Ok(mut response) => extract_string_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Handle request creation error - sets error message and returns render command
///
/// This is used when building an HTTP request fails (e.g., form serialization error).
pub fn handle_request_error<M, E>(
    model: &mut M,
    action: &str,
    error: impl std::fmt::Display,
) -> crux_core::Command<crate::Effect, E>
where
    M: crate::model::ModelErrorHandler,
    E: Send + 'static,
{
    model.set_error(format!("Failed to create {action} request: {error}"));
    crux_core::render::render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crux_http::testing::ResponseBuilder;

    #[test]
    fn server_error_keeps_body_text() {
        let error = HttpError::Http {
            code: StatusCode::InternalServerError,
            message: "Internal Server Error".to_string(),
            body: Some(b"flash busy".to_vec()),
        };

        assert_eq!(
            map_http_error("Save settings", error),
            "Save settings failed: HTTP 500: flash busy"
        );
    }

    #[test]
    fn server_error_without_usable_body_says_so() {
        let empty = HttpError::Http {
            code: StatusCode::ServiceUnavailable,
            message: "Service Unavailable".to_string(),
            body: Some(Vec::new()),
        };
        let missing = HttpError::Http {
            code: StatusCode::NotFound,
            message: "Not Found".to_string(),
            body: None,
        };
        let binary = HttpError::Http {
            code: StatusCode::BadRequest,
            message: "Bad Request".to_string(),
            body: Some(vec![0xff, 0xfe]),
        };

        assert_eq!(
            map_http_error("Refresh status", empty),
            "Refresh status failed: HTTP 503 (Empty body)"
        );
        assert_eq!(
            map_http_error("Refresh status", missing),
            "Refresh status failed: HTTP 404 (No body)"
        );
        assert!(map_http_error("Save settings", binary)
            .starts_with("Save settings failed: HTTP 400 (Invalid UTF-8:"));
    }

    #[test]
    fn transport_error_uses_its_own_description() {
        assert_eq!(
            map_http_error("Refresh status", HttpError::Timeout),
            "Refresh status failed: Timeout"
        );
        assert_eq!(
            map_http_error("Refresh status", HttpError::Io("connection refused".into())),
            "Refresh status failed: IO error: connection refused"
        );
    }

    #[test]
    fn non_success_response_is_described_like_an_error() {
        let mut response = ResponseBuilder::with_status(StatusCode::NotModified)
            .body(b"unchanged".to_vec())
            .build();

        assert_eq!(
            extract_string_response("Refresh status", &mut response),
            Err("Refresh status failed: HTTP 304: unchanged".to_string())
        );
    }

    #[test]
    fn success_response_returns_body_text() {
        let mut response = ResponseBuilder::ok().body(b"Settings saved".to_vec()).build();

        assert_eq!(
            process_text_response("Save settings", Ok(response.clone())),
            Ok("Settings saved".to_string())
        );
        assert_eq!(
            extract_string_response("Save settings", &mut response),
            Ok("Settings saved".to_string())
        );
    }
}
