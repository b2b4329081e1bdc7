//! Backend API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, body read, bad URL)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `message` is already extracted for display
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not valid JSON
    #[error("Invalid JSON from server: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Valid JSON in a shape the endpoint never returns
    #[error("Bad response format from {endpoint}")]
    UnexpectedShape { endpoint: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: busy");

        let err = ApiError::UnexpectedShape {
            endpoint: "/api/generate",
        };
        assert_eq!(err.to_string(), "Bad response format from /api/generate");
    }

    #[test]
    fn test_malformed_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ApiError = parse_err.into();
        assert!(matches!(err, ApiError::Malformed(_)));
    }
}
