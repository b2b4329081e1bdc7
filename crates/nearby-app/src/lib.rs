//! Nearby application layer: state, async services and the controller.

pub mod app;
pub mod error_mapping;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod store;

pub use app::{position_options_from, source_from_config, App};
pub use error_mapping::IntoAppError;
pub use orchestrator::generate_ideas;
pub use state::{AppEvent, AppState};
pub use store::AppStore;
