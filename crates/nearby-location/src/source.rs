//! Positioning services.

use std::future::Future;
use std::pin::Pin;

use crate::types::{LocationError, Position, PositionFix, PositionOptions};

pub type SourceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PositionFix, LocationError>> + Send + 'a>>;

/// A platform positioning service.
pub trait PositionSource: Send + Sync {
    /// Whether the runtime environment offers positioning at all.
    /// When false, no request is ever issued.
    fn is_supported(&self) -> bool {
        true
    }

    /// Request the current position. Timeouts are enforced by the caller.
    fn current_position<'a>(&'a self, options: &'a PositionOptions) -> SourceFuture<'a>;
}

/// Source for environments without a positioning service.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSource;

impl PositionSource for UnsupportedSource {
    fn is_supported(&self) -> bool {
        false
    }

    fn current_position<'a>(&'a self, _options: &'a PositionOptions) -> SourceFuture<'a> {
        Box::pin(async { Err(LocationError::Unsupported) })
    }
}

/// Source that always reports the same coordinates (configured or manually entered).
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    position: Position,
}

impl FixedSource {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl PositionSource for FixedSource {
    fn current_position<'a>(&'a self, _options: &'a PositionOptions) -> SourceFuture<'a> {
        let position = self.position;
        Box::pin(async move { Ok(PositionFix::now(position, None)) })
    }
}
