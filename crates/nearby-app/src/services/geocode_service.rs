//! Manual location entry: resolve a place name through the geocode endpoint.

use std::sync::Arc;

use nearby_api::ApiClient;
use nearby_core::AppError;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::error_mapping::IntoAppError;
use crate::state::AppEvent;

/// Resolve `query` and post its first match as the new position.
pub fn request_geocode(
    runtime: &Handle,
    tx: &UnboundedSender<AppEvent>,
    client: Arc<ApiClient>,
    query: String,
) {
    let _ = tx.send(AppEvent::LocationRequested);

    let tx = tx.clone();
    runtime.spawn(async move {
        let event = match client.geocode(&query).await {
            Ok(results) => match results.first() {
                Some(result) => {
                    tracing::info!("Resolved '{}' to {}", query, result.name);
                    AppEvent::LocationResolved(result.position())
                }
                None => {
                    tracing::warn!("No geocode results for '{}'", query);
                    AppEvent::LocationFailed(AppError::PositionUnavailable)
                }
            },
            Err(e) => {
                tracing::warn!("Geocode failed for '{}': {}", query, e);
                AppEvent::LocationFailed(e.into_app_error())
            }
        };
        let _ = tx.send(event);
    });
}
