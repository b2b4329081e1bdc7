use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::source::PositionSource;
use crate::types::{LocationError, Position, PositionFix, PositionOptions};

/// Acquires positions from a [`PositionSource`].
///
/// A successful acquisition replaces the stored fix, which later calls reuse
/// while it is younger than the configured maximum age. Failures are returned
/// to the caller and not stored.
pub struct LocationProvider {
    source: Arc<dyn PositionSource>,
    options: PositionOptions,
    last_fix: RwLock<Option<PositionFix>>,
}

impl LocationProvider {
    pub fn new(source: Arc<dyn PositionSource>, options: PositionOptions) -> Self {
        Self {
            source,
            options,
            last_fix: RwLock::new(None),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_supported()
    }

    /// Acquire the current position.
    ///
    /// Fails with `Unsupported` without issuing a request when the source has
    /// no positioning capability. A cached fix younger than the configured
    /// maximum age is returned as-is. Safe to call repeatedly.
    pub async fn acquire(&self) -> Result<Position, LocationError> {
        if !self.source.is_supported() {
            return Err(failed(LocationError::Unsupported));
        }

        if let Some(position) = self.fresh_cached() {
            tracing::debug!("Using cached position fix: {}", position);
            return Ok(position);
        }

        tracing::debug!(
            "Requesting position (high_accuracy={}, timeout={:?})",
            self.options.high_accuracy,
            self.options.timeout
        );

        let result = tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(&self.options),
        )
        .await;

        match result {
            Ok(Ok(fix)) => {
                let position = fix.position;
                tracing::info!("Got location: {}", position);
                *self.last_fix.write() = Some(fix);
                Ok(position)
            }
            Ok(Err(e)) => Err(failed(e)),
            Err(_) => Err(failed(LocationError::Timeout)),
        }
    }

    fn fresh_cached(&self) -> Option<Position> {
        let guard = self.last_fix.read();
        let fix = guard.as_ref()?;
        (fix.age_at(Utc::now()) <= self.options.maximum_age).then_some(fix.position)
    }
}

fn failed(error: LocationError) -> LocationError {
    tracing::warn!("Location acquisition failed: {}", error);
    error
}
