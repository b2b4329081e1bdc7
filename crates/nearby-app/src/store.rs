//! Event channel and the state it feeds.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::state::{AppEvent, AppState};

/// Owns [`AppState`] and the channel async tasks post completions to.
///
/// The store keeps a sender alive itself, so the channel never closes while
/// the store exists.
pub struct AppStore {
    state: AppState,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an event directly, bypassing the channel
    pub fn apply(&mut self, event: AppEvent) {
        tracing::trace!("Applying {:?}", event);
        self.state.apply(event);
    }

    /// Wait for the next posted event and apply it. Returns the applied event.
    pub async fn next(&mut self) -> Option<AppEvent> {
        let event = self.rx.recv().await?;
        self.apply(event.clone());
        Some(event)
    }

}
