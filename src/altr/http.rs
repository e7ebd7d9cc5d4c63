//! Response handling for the ALTR REST API.
//!
//! Success bodies decode into typed DTOs. Failure bodies are classified with
//! a three-tier fallback because the API is not consistent about its error
//! envelope across endpoints: first the structured
//! `{"error": {"error_code", "message"}}` shape, then the flat
//! `{"error_code", "message"}` shape, and finally the raw body text.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Structured error envelope: `{"error": {"error_code": .., "message": ..}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

/// Flat error shape: `{"error_code": .., "message": ..}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

impl ErrorBody {
    /// A parse only counts if it produced a usable code or message.
    fn has_signal(&self) -> bool {
        self.error_code != 0 || !self.message.is_empty()
    }
}

/// Decode a response into `T`, or classify the failure.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        return serde_json::from_slice(&bytes).map_err(Error::Decode);
    }

    Err(classify_error(status, &read_error_body(response).await?))
}

/// Check a response for success, ignoring any body.
pub(crate) async fn expect_success(response: Response) -> Result<(), Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    Err(classify_error(status, &read_error_body(response).await?))
}

async fn read_error_body(response: Response) -> Result<String, Error> {
    let body = response.text().await?;
    tracing::error!(body = %sanitize_for_log(&body), "API error response");
    Ok(body)
}

/// Map a non-2xx status and body to an [`Error::Api`].
pub(crate) fn classify_error(status: StatusCode, body: &str) -> Error {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if envelope.error.has_signal() {
            return Error::Api {
                status: status.as_u16(),
                code: envelope.error.error_code,
                message: envelope.error.message,
            };
        }
    }

    if let Ok(flat) = serde_json::from_str::<ErrorBody>(body) {
        if flat.has_signal() {
            return Error::Api {
                status: status.as_u16(),
                code: flat.error_code,
                message: flat.message,
            };
        }
    }

    // Unknown shape: keep the raw body so no information is dropped.
    Error::Api {
        status: status.as_u16(),
        code: 0,
        message: body.to_string(),
    }
}

/// Truncate long response bodies before logging them.
fn sanitize_for_log(body: &str) -> String {
    if body.len() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_parts(err: Error) -> (u16, i64, String) {
        match err {
            Error::Api {
                status,
                code,
                message,
            } => (status, code, message),
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn classifies_structured_envelope() {
        let err = classify_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"error_code":7,"message":"bad"}}"#,
        );
        assert_eq!(api_parts(err), (400, 7, "bad".to_string()));
    }

    #[test]
    fn classifies_flat_shape() {
        let err = classify_error(StatusCode::BAD_REQUEST, r#"{"error_code":7,"message":"bad"}"#);
        assert_eq!(api_parts(err), (400, 7, "bad".to_string()));
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
        assert_eq!(api_parts(err), (500, 0, "upstream exploded".to_string()));
    }

    #[test]
    fn json_without_signal_falls_back_to_raw_body() {
        let err = classify_error(StatusCode::BAD_GATEWAY, r#"{"detail":"nope"}"#);
        assert_eq!(api_parts(err), (502, 0, r#"{"detail":"nope"}"#.to_string()));
    }

    #[test]
    fn structured_envelope_with_message_only() {
        let err = classify_error(
            StatusCode::FORBIDDEN,
            r#"{"error":{"message":"denied"}}"#,
        );
        assert_eq!(api_parts(err), (403, 0, "denied".to_string()));
    }

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.len() < body.len());
        assert!(logged.contains("truncated"));
    }
}
