use nearby_core::AppError;
use nearby_location::LocationError;

use super::IntoAppError;

impl IntoAppError for LocationError {
    fn into_app_error(self) -> AppError {
        match self {
            LocationError::PermissionDenied => AppError::PermissionDenied,
            LocationError::PositionUnavailable => AppError::PositionUnavailable,
            LocationError::Timeout => AppError::Timeout,
            LocationError::Unsupported => AppError::Unsupported,
        }
    }
}
