//! Idea generation: validate the position, build the request, normalize.

use nearby_api::{ApiClient, EventIdea, FilterState, GenerateRequest};
use nearby_core::AppError;
use nearby_location::Position;

use crate::error_mapping::IntoAppError;

/// Generate ideas for `position` under `filters`.
///
/// Without a position this fails with [`AppError::LocationRequired`] and no
/// request is made.
pub async fn generate_ideas(
    client: &ApiClient,
    position: Option<Position>,
    filters: &FilterState,
) -> Result<Vec<EventIdea>, AppError> {
    let Some(position) = position else {
        tracing::warn!("Generate requested before a position was known");
        return Err(AppError::LocationRequired);
    };

    let request = GenerateRequest::new(position, filters);
    tracing::debug!(
        "Generating ideas at {} within {} km",
        position,
        request.distance_km
    );

    client
        .generate(&request)
        .await
        .map_err(IntoAppError::into_app_error)
}
