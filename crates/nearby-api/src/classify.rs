//! Classification of HTTP responses into [`ApiError`]s.

use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::error::ApiError;

/// Message for a non-2xx response.
///
/// Prefers the JSON `error` field, then the raw body text, then the status
/// line (`"503 Service Unavailable"`). Never empty.
pub fn status_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        match map.get("error") {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
            Some(Value::Null) | Some(Value::String(_)) | None => {}
            Some(other) => return other.to_string(),
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status_line(status)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Read the body and fail with [`ApiError::Status`] for non-2xx responses.
pub async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = status_message(status, &body);
        tracing::debug!("Request failed with status {}: {}", status, message);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

/// Parse a successful body as JSON.
pub fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Response body is not JSON: {}", e);
        ApiError::Malformed(e)
    })
}
