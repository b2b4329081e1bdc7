//! Centralized error types for the Nearby application.
//!
//! This module provides the user-facing error taxonomy that:
//! - Distinguishes every failure the location and generation flows can hit
//! - Provides user-friendly messages suitable for UI display
//! - Tells the UI which retry action to offer

use thiserror::Error;

/// Machine-distinguishable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    LocationRequired,
    TransportFailure,
    HttpStatusFailure,
    MalformedResponse,
    UnexpectedResponseShape,
}

/// Which retry the UI should offer next to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Re-attempt position acquisition
    Location,
    /// Re-issue the idea generation request
    Generate,
    /// Nothing to retry
    None,
}

/// Top-level application error type.
///
/// Every failure that reaches UI state is converted to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Positioning is not supported")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Generation attempted without a position")]
    LocationRequired,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server error: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected response shape from {endpoint}")]
    UnexpectedResponseShape { endpoint: String },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unsupported => ErrorKind::Unsupported,
            AppError::PermissionDenied => ErrorKind::PermissionDenied,
            AppError::PositionUnavailable => ErrorKind::PositionUnavailable,
            AppError::Timeout => ErrorKind::Timeout,
            AppError::LocationRequired => ErrorKind::LocationRequired,
            AppError::Transport(_) => ErrorKind::TransportFailure,
            AppError::HttpStatus { .. } => ErrorKind::HttpStatusFailure,
            AppError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            AppError::UnexpectedResponseShape { .. } => ErrorKind::UnexpectedResponseShape,
        }
    }

    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// Never empty. HTTP status failures carry the server's own message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unsupported => "Geolocation is not supported on this device.".to_string(),
            AppError::PermissionDenied => {
                "Location access denied. Please enable location services.".to_string()
            }
            AppError::PositionUnavailable => "Location information is unavailable.".to_string(),
            AppError::Timeout => "Location request timed out.".to_string(),
            AppError::LocationRequired => "Location is required to generate ideas".to_string(),
            AppError::Transport(_) => {
                "Unable to connect. Check your internet connection.".to_string()
            }
            AppError::HttpStatus { status, message } => {
                if message.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    message.clone()
                }
            }
            AppError::MalformedResponse(_) => "Invalid JSON from server".to_string(),
            AppError::UnexpectedResponseShape { endpoint } => {
                format!("Bad response format from {}", endpoint)
            }
        }
    }

    pub fn retry_action(&self) -> RetryAction {
        match self {
            AppError::Unsupported => RetryAction::None,
            AppError::PermissionDenied | AppError::PositionUnavailable | AppError::Timeout => {
                RetryAction::Location
            }
            AppError::LocationRequired
            | AppError::Transport(_)
            | AppError::HttpStatus { .. }
            | AppError::MalformedResponse(_)
            | AppError::UnexpectedResponseShape { .. } => RetryAction::Generate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<AppError> {
        vec![
            AppError::Unsupported,
            AppError::PermissionDenied,
            AppError::PositionUnavailable,
            AppError::Timeout,
            AppError::LocationRequired,
            AppError::Transport("connection refused".into()),
            AppError::HttpStatus {
                status: 500,
                message: "rate limited".into(),
            },
            AppError::MalformedResponse("expected value".into()),
            AppError::UnexpectedResponseShape {
                endpoint: "/api/generate".into(),
            },
        ]
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        for err in all_errors() {
            assert!(!err.user_message().trim().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_http_status_uses_server_message() {
        let err = AppError::HttpStatus {
            status: 500,
            message: "rate limited".into(),
        };
        assert_eq!(err.user_message(), "rate limited");
        assert_eq!(err.kind(), ErrorKind::HttpStatusFailure);
    }

    #[test]
    fn test_http_status_blank_message_falls_back() {
        let err = AppError::HttpStatus {
            status: 502,
            message: "   ".into(),
        };
        assert!(err.user_message().contains("502"));
    }

    #[test]
    fn test_retry_actions() {
        assert_eq!(AppError::Unsupported.retry_action(), RetryAction::None);
        assert_eq!(AppError::PermissionDenied.retry_action(), RetryAction::Location);
        assert_eq!(AppError::Timeout.retry_action(), RetryAction::Location);
        assert_eq!(
            AppError::MalformedResponse("x".into()).retry_action(),
            RetryAction::Generate
        );
        assert_eq!(
            AppError::Transport("x".into()).retry_action(),
            RetryAction::Generate
        );
    }

    #[test]
    fn test_location_required_retries_generation() {
        assert_eq!(
            AppError::LocationRequired.retry_action(),
            RetryAction::Generate
        );
    }

    #[test]
    fn test_shape_message_names_endpoint() {
        let err = AppError::UnexpectedResponseShape {
            endpoint: "/api/generate".into(),
        };
        assert_eq!(err.user_message(), "Bad response format from /api/generate");
    }
}
