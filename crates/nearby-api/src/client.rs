//! Client for the ideas backend.

use std::sync::Arc;

use nearby_location::Position;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::classify::{parse_json, read_body};
use crate::error::ApiError;
use crate::normalize::{normalize_all, normalize_weather, GenerateResponseShape};
use crate::types::{
    EventIdea, GenerateRequest, GeocodeResponse, GeocodeResult, Place, PlacesResponse,
    PlacesSearchRequest, WeatherSnapshot,
};

pub const WEATHER_PATH: &str = "/api/weather";
pub const GENERATE_PATH: &str = "/api/generate";
pub const GEOCODE_PATH: &str = "/api/geocode";
pub const PLACES_SEARCH_PATH: &str = "/api/places/search";

const USER_AGENT: &str = concat!("nearby/", env!("CARGO_PKG_VERSION"));

/// Ideas backend client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend rooted at `base_url` (`API_BASE`).
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current conditions at `position`.
    #[instrument(skip(self), level = "debug")]
    pub async fn weather(&self, position: Position) -> Result<WeatherSnapshot, ApiError> {
        let response = self
            .client
            .get(self.endpoint(WEATHER_PATH))
            .query(&[("lat", position.lat), ("lng", position.lng)])
            .send()
            .await?;

        let body = read_body(response).await?;
        let value = parse_json(&body)?;

        normalize_weather(&value).ok_or(ApiError::UnexpectedShape {
            endpoint: WEATHER_PATH,
        })
    }

    /// Generate ideas. Accepts either a bare array or `{ "ideas": [...] }`.
    #[instrument(skip(self), level = "info")]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Vec<EventIdea>, ApiError> {
        let response = self
            .client
            .post(self.endpoint(GENERATE_PATH))
            .json(request)
            .send()
            .await?;

        let body = read_body(response).await?;
        let value = parse_json(&body)?;

        let records = GenerateResponseShape::from_value(value)
            .into_records()
            .ok_or_else(|| {
                tracing::error!("Unexpected {} response shape", GENERATE_PATH);
                ApiError::UnexpectedShape {
                    endpoint: GENERATE_PATH,
                }
            })?;

        let ideas = normalize_all(&records);
        tracing::info!("Generated {} ideas", ideas.len());
        Ok(ideas)
    }

    /// Resolve a place name to coordinates (manual location entry).
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(GEOCODE_PATH))
            .query(&[("q", query)])
            .send()
            .await?;

        let body: GeocodeResponse = self.decode(response, GEOCODE_PATH).await?;
        Ok(body.results)
    }

    /// Search for places around a point.
    #[instrument(skip(self), level = "debug")]
    pub async fn search_places(
        &self,
        request: &PlacesSearchRequest,
    ) -> Result<Vec<Place>, ApiError> {
        let response = self
            .client
            .post(self.endpoint(PLACES_SEARCH_PATH))
            .json(request)
            .send()
            .await?;

        let body: PlacesResponse = self.decode(response, PLACES_SEARCH_PATH).await?;
        Ok(body.places)
    }

    /// Check status, parse JSON, then map into `T`; a mismatch is a shape error.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        endpoint: &'static str,
    ) -> Result<T, ApiError> {
        let body = read_body(response).await?;
        let value = parse_json(&body)?;

        serde_json::from_value(value).map_err(|e| {
            tracing::debug!("Unexpected {} response shape: {}", endpoint, e);
            ApiError::UnexpectedShape { endpoint }
        })
    }
}
