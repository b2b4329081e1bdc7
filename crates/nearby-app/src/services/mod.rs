//! Async task launchers. Each task posts exactly one completion event.

pub mod generate_service;
pub mod geocode_service;
pub mod location_service;
pub mod weather_service;
