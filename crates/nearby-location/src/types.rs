use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// A position reported by a positioning service at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionFix {
    pub position: Position,
    pub accuracy_meters: Option<f64>,
    pub acquired_at: DateTime<Utc>,
}

impl PositionFix {
    /// A fix taken now
    pub fn now(position: Position, accuracy_meters: Option<f64>) -> Self {
        Self {
            position,
            accuracy_meters,
            acquired_at: Utc::now(),
        }
    }

    /// Age of the fix relative to `now`. Fixes stamped in the future count as fresh.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.acquired_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Options passed to the positioning service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix younger than this may be returned without a new request
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Location service errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location information is unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Positioning is not supported")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(300));
    }

    #[test]
    fn test_fix_age() {
        let fix = PositionFix::now(Position::new(1.0, 2.0), None);
        let later = fix.acquired_at + TimeDelta::seconds(90);
        assert_eq!(fix.age_at(later), Duration::from_secs(90));
    }

    #[test]
    fn test_future_fix_counts_as_fresh() {
        let fix = PositionFix::now(Position::new(1.0, 2.0), None);
        let earlier = fix.acquired_at - TimeDelta::seconds(30);
        assert_eq!(fix.age_at(earlier), Duration::ZERO);
    }

    #[test]
    fn test_position_serializes_as_lat_lng() {
        let json = serde_json::to_string(&Position::new(47.5, -122.25)).unwrap();
        assert_eq!(json, r#"{"lat":47.5,"lng":-122.25}"#);
    }
}
