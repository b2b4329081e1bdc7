//! Location backend: async position acquisition.
//! Results are posted to the store as `LocationResolved` or `LocationFailed`.

use std::sync::Arc;

use nearby_core::AppError;
use nearby_location::LocationProvider;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::error_mapping::IntoAppError;
use crate::state::AppEvent;

/// Request the current position.
///
/// An unsupported environment fails immediately, without spawning.
pub fn request_acquire(
    runtime: &Handle,
    tx: &UnboundedSender<AppEvent>,
    provider: Arc<LocationProvider>,
) {
    if !provider.is_supported() {
        let _ = tx.send(AppEvent::LocationFailed(AppError::Unsupported));
        return;
    }

    let tx = tx.clone();
    runtime.spawn(async move {
        let event = match provider.acquire().await {
            Ok(position) => AppEvent::LocationResolved(position),
            Err(e) => AppEvent::LocationFailed(e.into_app_error()),
        };
        let _ = tx.send(event);
    });
}

/// Clear the location error and acquire again.
pub fn request_retry(
    runtime: &Handle,
    tx: &UnboundedSender<AppEvent>,
    provider: Arc<LocationProvider>,
) {
    let _ = tx.send(AppEvent::LocationRequested);
    request_acquire(runtime, tx, provider);
}
