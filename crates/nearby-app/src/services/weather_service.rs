//! Weather backend: fetch conditions for a resolved position.
//! Failures are logged and never surface as UI errors.

use std::sync::Arc;

use nearby_api::ApiClient;
use nearby_location::Position;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::state::AppEvent;

/// Request weather for `position`. Posts `WeatherResolved` or `WeatherFailed`.
pub fn request_fetch(
    runtime: &Handle,
    tx: &UnboundedSender<AppEvent>,
    client: Arc<ApiClient>,
    position: Position,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let event = match client.weather(position).await {
            Ok(snapshot) => AppEvent::WeatherResolved { position, snapshot },
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                AppEvent::WeatherFailed { position }
            }
        };
        let _ = tx.send(event);
    });
}
