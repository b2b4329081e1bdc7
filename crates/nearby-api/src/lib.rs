//! HTTP client and payload handling for the Nearby ideas backend.

pub mod classify;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod units;

pub use client::ApiClient;
pub use error::ApiError;
pub use normalize::{normalize, GenerateResponseShape};
pub use types::*;
pub use units::to_distance_km;
