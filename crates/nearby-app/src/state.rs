//! Application state and its transitions.
//!
//! Every async task reports back with exactly one [`AppEvent`]; the state only
//! changes through [`AppState::apply`]. Events are applied in arrival order,
//! so a slower, older generation result still overwrites a newer one
//! (last-resolved-wins).

use nearby_api::{EventIdea, FilterState, WeatherSnapshot};
use nearby_core::{AppError, RetryAction};
use nearby_location::Position;

/// Completion and user events posted into the store
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A location retry began; clears the location error
    LocationRequested,
    LocationResolved(Position),
    LocationFailed(AppError),
    /// Weather for `position`; dropped if the position has since changed
    WeatherResolved {
        position: Position,
        snapshot: WeatherSnapshot,
    },
    /// Weather fetch failed; never surfaced
    WeatherFailed { position: Position },
    FiltersChanged(FilterState),
    GenerateStarted,
    GenerateSucceeded(Vec<EventIdea>),
    GenerateFailed(AppError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub filters: FilterState,
    pub position: Option<Position>,
    pub weather: Option<WeatherSnapshot>,
    pub ideas: Vec<EventIdea>,
    pub is_loading: bool,
    pub error: Option<AppError>,
    pub location_error: Option<AppError>,
}

impl AppState {
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::LocationRequested => {
                self.location_error = None;
            }
            AppEvent::LocationResolved(position) => {
                self.position = Some(position);
                self.weather = None;
                self.location_error = None;
            }
            AppEvent::LocationFailed(error) => {
                self.location_error = Some(error);
            }
            AppEvent::WeatherResolved { position, snapshot } => {
                if self.position == Some(position) {
                    self.weather = Some(snapshot);
                } else {
                    tracing::debug!("Dropping weather for stale position {}", position);
                }
            }
            AppEvent::WeatherFailed { .. } => {}
            AppEvent::FiltersChanged(filters) => {
                self.filters = filters;
            }
            AppEvent::GenerateStarted => {
                self.is_loading = true;
                self.error = None;
            }
            AppEvent::GenerateSucceeded(ideas) => {
                self.ideas = ideas;
                self.error = None;
                self.is_loading = false;
            }
            AppEvent::GenerateFailed(error) => {
                self.ideas.clear();
                self.error = Some(error);
                self.is_loading = false;
            }
        }
    }

    /// The one error to show: the location error takes precedence
    pub fn visible_error(&self) -> Option<&AppError> {
        self.location_error.as_ref().or(self.error.as_ref())
    }

    /// Retry offered next to the visible error
    pub fn retry_action(&self) -> RetryAction {
        match (&self.location_error, &self.error) {
            (Some(AppError::Unsupported), _) => RetryAction::None,
            (Some(_), _) => RetryAction::Location,
            (None, Some(error)) => error.retry_action(),
            (None, None) => RetryAction::None,
        }
    }

    pub fn can_generate(&self) -> bool {
        self.position.is_some() && !self.is_loading
    }

    pub fn show_empty_state(&self) -> bool {
        self.ideas.is_empty() && !self.is_loading && self.error.is_none()
    }

    /// Location indicator text, with the weather suffix when a snapshot exists
    pub fn location_label(&self) -> String {
        if self.position.is_none() {
            return "Getting location...".to_string();
        }

        match self.weather.as_ref().and_then(WeatherSnapshot::display_suffix) {
            Some(suffix) => format!("Location detected • {}", suffix),
            None => "Location detected".to_string(),
        }
    }
}
