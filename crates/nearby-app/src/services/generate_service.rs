//! Generate backend: run the orchestrator off the caller's task.

use std::sync::Arc;

use nearby_api::{ApiClient, FilterState};
use nearby_core::AppError;
use nearby_location::Position;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::orchestrator;
use crate::state::AppEvent;

/// Posts a failure if the task ends without reporting, so loading never sticks.
struct CompletionGuard {
    tx: UnboundedSender<AppEvent>,
    finished: bool,
}

impl CompletionGuard {
    fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            finished: false,
        }
    }

    fn finish(mut self, event: AppEvent) {
        self.finished = true;
        let _ = self.tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Generate task ended without a result");
            let _ = self.tx.send(AppEvent::GenerateFailed(AppError::Transport(
                "Generation was interrupted".to_string(),
            )));
        }
    }
}

/// Run a generation. Posts exactly one of `GenerateSucceeded` or
/// `GenerateFailed`; the caller applies `GenerateStarted` itself.
pub fn request_generate(
    runtime: &Handle,
    tx: &UnboundedSender<AppEvent>,
    client: Arc<ApiClient>,
    position: Option<Position>,
    filters: FilterState,
) {
    let guard = CompletionGuard::new(tx.clone());
    runtime.spawn(async move {
        let event = match orchestrator::generate_ideas(&client, position, &filters).await {
            Ok(ideas) => AppEvent::GenerateSucceeded(ideas),
            Err(e) => {
                tracing::error!("Idea generation failed: {}", e);
                AppEvent::GenerateFailed(e)
            }
        };
        guard.finish(event);
    });
}
