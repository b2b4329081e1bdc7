//! Application controller: owns the store and launches the async services.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use nearby_api::{ApiClient, FilterState};
use nearby_core::{Config, LocationConfig, RetryAction};
use nearby_location::{
    FixedSource, LocationProvider, Position, PositionOptions, PositionSource, UnsupportedSource,
};
use tokio::runtime::Handle;

use crate::services::{generate_service, geocode_service, location_service, weather_service};
use crate::state::{AppEvent, AppState};
use crate::store::AppStore;

/// Position request options from the `[location]` config section
pub fn position_options_from(config: &LocationConfig) -> PositionOptions {
    PositionOptions {
        high_accuracy: config.high_accuracy,
        timeout: Duration::from_secs(config.timeout_secs),
        maximum_age: Duration::from_secs(config.maximum_age_secs),
    }
}

/// Positioning source for this environment.
///
/// Configured coordinates act as a fixed source; otherwise positioning is
/// unsupported and the user has to enter a place name.
pub fn source_from_config(config: &LocationConfig) -> Arc<dyn PositionSource> {
    match config.fixed_coordinates() {
        Some((lat, lng)) => Arc::new(FixedSource::new(Position::new(lat, lng))),
        None => Arc::new(UnsupportedSource),
    }
}

pub struct App {
    config: Config,
    runtime: Handle,
    client: Arc<ApiClient>,
    provider: Arc<LocationProvider>,
    store: AppStore,
}

impl App {
    /// Create the app on the current Tokio runtime.
    pub fn new(config: Config, source: Arc<dyn PositionSource>) -> Result<Self> {
        let runtime = Handle::try_current().context("App must be created inside a Tokio runtime")?;
        let client = ApiClient::new(&config.api.base_url).context("Failed to build HTTP client")?;
        let provider = LocationProvider::new(source, position_options_from(&config.location));

        tracing::info!("Using ideas backend at '{}'", client.base_url());

        Ok(Self {
            config,
            runtime,
            client: Arc::new(client),
            provider: Arc::new(provider),
            store: AppStore::new(AppState::default()),
        })
    }

    /// Create the app with the positioning source the config describes.
    pub fn from_config(config: Config) -> Result<Self> {
        let source = source_from_config(&config.location);
        Self::new(config, source)
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Begin the first location request.
    ///
    /// A configured place name is geocoded unless fixed coordinates are set.
    pub fn start(&mut self) {
        let location = &self.config.location;
        let query = match location.fixed_coordinates() {
            Some(_) => None,
            None => location.query.clone().filter(|q| !q.trim().is_empty()),
        };

        match query {
            Some(query) => self.locate_by_query(query),
            None => {
                location_service::request_acquire(
                    &self.runtime,
                    &self.store.sender(),
                    self.provider.clone(),
                );
            }
        }
    }

    pub fn retry_location(&mut self) {
        location_service::request_retry(&self.runtime, &self.store.sender(), self.provider.clone());
    }

    pub fn locate_by_query(&mut self, query: impl Into<String>) {
        geocode_service::request_geocode(
            &self.runtime,
            &self.store.sender(),
            self.client.clone(),
            query.into(),
        );
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.store.apply(AppEvent::FiltersChanged(filters));
    }

    /// Generate ideas for the current position and filters.
    ///
    /// Loading is set before this returns, so `can_generate()` closes at once.
    pub fn generate(&mut self) {
        self.store.apply(AppEvent::GenerateStarted);

        let state = self.store.state();
        generate_service::request_generate(
            &self.runtime,
            &self.store.sender(),
            self.client.clone(),
            state.position,
            state.filters,
        );
    }

    /// Run whichever retry the visible error offers.
    pub fn retry(&mut self) {
        match self.store.state().retry_action() {
            RetryAction::Location => self.retry_location(),
            RetryAction::Generate => self.generate(),
            RetryAction::None => {}
        }
    }

    /// Apply the next completion event. A newly resolved position starts a
    /// weather fetch for it.
    pub async fn process_next(&mut self) -> Option<AppEvent> {
        let event = self.store.next().await?;

        if let AppEvent::LocationResolved(position) = &event {
            weather_service::request_fetch(
                &self.runtime,
                &self.store.sender(),
                self.client.clone(),
                *position,
            );
        }

        Some(event)
    }

    /// Process events until one matching `matches` has been applied.
    pub async fn wait_for_event<F>(&mut self, matches: F) -> Option<AppEvent>
    where
        F: Fn(&AppEvent) -> bool,
    {
        while let Some(event) = self.process_next().await {
            if matches(&event) {
                return Some(event);
            }
        }
        None
    }

    /// Process events until `done` holds for the state.
    pub async fn wait_until<F>(&mut self, done: F)
    where
        F: Fn(&AppState) -> bool,
    {
        while !done(self.store.state()) {
            if self.process_next().await.is_none() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_options_from_config() {
        let config = LocationConfig {
            high_accuracy: false,
            timeout_secs: 3,
            maximum_age_secs: 0,
            ..Default::default()
        };
        let options = position_options_from(&config);

        assert!(!options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_source_from_config() {
        let fixed = LocationConfig {
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..Default::default()
        };
        assert!(source_from_config(&fixed).is_supported());
        assert!(!source_from_config(&LocationConfig::default()).is_supported());
    }

    #[test]
    fn test_new_requires_runtime() {
        let result = App::new(Config::default(), Arc::new(UnsupportedSource));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_start_sets_location_error() {
        let mut app = App::from_config(Config::default()).unwrap();
        app.start();
        app.wait_until(|s| s.location_error.is_some()).await;

        assert_eq!(
            app.state().location_error,
            Some(nearby_core::AppError::Unsupported)
        );
        assert_eq!(app.state().retry_action(), RetryAction::None);
    }

    #[tokio::test]
    async fn test_blank_query_falls_back_to_source() {
        let mut config = Config::default();
        config.location.query = Some("   ".to_string());
        let mut app = App::from_config(config).unwrap();

        app.start();
        let event = app.process_next().await;

        assert_eq!(
            event,
            Some(AppEvent::LocationFailed(nearby_core::AppError::Unsupported))
        );
    }

    #[tokio::test]
    async fn test_generate_sets_loading_immediately() {
        let mut app = App::new(
            Config::default(),
            Arc::new(FixedSource::new(Position::new(1.0, 2.0))),
        )
        .unwrap();
        app.start();
        app.wait_until(|s| s.position.is_some()).await;
        assert!(app.state().can_generate());

        app.generate();

        assert!(app.state().is_loading);
        assert!(!app.state().can_generate());
    }

    #[tokio::test]
    async fn test_set_filters_applies_immediately() {
        let mut app = App::from_config(Config::default()).unwrap();
        let mut filters = FilterState::default();
        filters.set_distance_miles(3);
        app.set_filters(filters);

        assert_eq!(app.state().filters.distance_miles, 3);
    }
}
