//! Maps crate errors to nearby_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod api;
mod location;

use nearby_core::AppError;

/// Conversion of a lower-level error into the application taxonomy.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
