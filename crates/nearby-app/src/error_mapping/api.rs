use nearby_api::ApiError;
use nearby_core::AppError;

use super::IntoAppError;

impl IntoAppError for ApiError {
    fn into_app_error(self) -> AppError {
        match self {
            ApiError::Network(e) => AppError::Transport(e.to_string()),
            ApiError::Status { status, message } => AppError::HttpStatus { status, message },
            ApiError::Malformed(e) => AppError::MalformedResponse(e.to_string()),
            ApiError::UnexpectedShape { endpoint } => AppError::UnexpectedResponseShape {
                endpoint: endpoint.to_string(),
            },
        }
    }
}
