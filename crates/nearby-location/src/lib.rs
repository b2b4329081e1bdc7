//! Position acquisition for Nearby
//!
//! Wraps a platform positioning service behind [`PositionSource`] and adds
//! timeout handling and cached-fix reuse.

pub mod provider;
pub mod source;
pub mod types;

pub use provider::LocationProvider;
pub use source::{FixedSource, PositionSource, SourceFuture, UnsupportedSource};
pub use types::*;
