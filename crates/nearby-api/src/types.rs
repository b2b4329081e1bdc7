//! Filter state and backend wire types.

use nearby_location::Position;
use serde::{Deserialize, Serialize};

use crate::units::to_distance_km;

/// Spending tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Budget {
    #[default]
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "<20")]
    Under20,
    #[serde(rename = "20-50")]
    From20To50,
    #[serde(rename = "50+")]
    Over50,
}

impl Budget {
    pub const ALL: [Budget; 4] = [Self::Free, Self::Under20, Self::From20To50, Self::Over50];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Under20 => "<20",
            Self::From20To50 => "20-50",
            Self::Over50 => "50+",
        }
    }

    /// Label shown in the filter control
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Under20 => "<$20",
            Self::From20To50 => "$20-50",
            Self::Over50 => "$50+",
        }
    }
}

/// Who the outing is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    #[default]
    Solo,
    Date,
    Friends,
    Family,
}

impl Vibe {
    pub const ALL: [Vibe; 4] = [Self::Solo, Self::Date, Self::Friends, Self::Family];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Date => "date",
            Self::Friends => "friends",
            Self::Family => "family",
        }
    }
}

/// When the outing happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Now,
    Tonight,
    Weekend,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [Self::Now, Self::Tonight, Self::Weekend];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Tonight => "tonight",
            Self::Weekend => "weekend",
        }
    }
}

/// Indoor/outdoor preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndoorOutdoor {
    #[default]
    Any,
    Indoor,
    Outdoor,
}

impl IndoorOutdoor {
    pub const ALL: [IndoorOutdoor; 3] = [Self::Any, Self::Indoor, Self::Outdoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }
}

pub const MIN_DISTANCE_MILES: u8 = 1;
pub const MAX_DISTANCE_MILES: u8 = 10;

/// User-facing filter choices. Every field is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub budget: Budget,
    pub vibe: Vibe,
    pub window: TimeWindow,
    /// Search radius in miles
    pub distance_miles: u8,
    pub indoor_outdoor: IndoorOutdoor,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            budget: Budget::Free,
            vibe: Vibe::Solo,
            window: TimeWindow::Now,
            distance_miles: 5,
            indoor_outdoor: IndoorOutdoor::Any,
        }
    }
}

impl FilterState {
    /// Set the distance, clamped to the slider range
    pub fn set_distance_miles(&mut self, miles: u8) {
        self.distance_miles = miles.clamp(MIN_DISTANCE_MILES, MAX_DISTANCE_MILES);
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub lat: f64,
    pub lng: f64,
    pub budget: Budget,
    pub vibe: Vibe,
    pub window: TimeWindow,
    pub distance_km: u8,
    pub indoor_outdoor: IndoorOutdoor,
}

impl GenerateRequest {
    pub fn new(position: Position, filters: &FilterState) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
            budget: filters.budget,
            vibe: filters.vibe,
            window: filters.window,
            distance_km: to_distance_km(f64::from(filters.distance_miles)),
            indoor_outdoor: filters.indoor_outdoor,
        }
    }
}

/// A link attached to an idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaLink {
    pub name: String,
    pub url: String,
}

/// Canonical idea record, whatever shape the backend sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdea {
    pub id: String,
    pub title: String,
    pub category: String,
    pub cost: String,
    pub why_today: String,
    pub links: Vec<IdeaLink>,
}

/// Point-in-time weather reading. Only the display fields are interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>,
    pub condition: Option<String>,
    /// 0..1
    pub precip_chance: Option<f64>,
    pub sunrise_iso: Option<String>,
    pub sunset_iso: Option<String>,
}

impl WeatherSnapshot {
    /// Suffix for the location indicator, e.g. `72° Sunny`
    pub fn display_suffix(&self) -> Option<String> {
        match (self.temperature, self.condition.as_deref()) {
            (Some(t), Some(c)) => Some(format!("{}° {}", t.round(), c)),
            (Some(t), None) => Some(format!("{}°", t.round())),
            (None, Some(c)) => Some(c.to_string()),
            (None, None) => None,
        }
    }
}

/// One `/api/geocode` match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResult {
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lng)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// Body of `POST /api/places/search`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesSearchRequest {
    pub lat: f64,
    pub lng: f64,
    pub radius_meters: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

/// A place returned by the places search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub price_tier: Option<u8>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub open_now: Option<bool>,
    pub distance_meters: Option<f64>,
    pub address: Option<String>,
    pub maps_url: Option<String>,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filters = FilterState::default();
        assert_eq!(filters.budget, Budget::Free);
        assert_eq!(filters.vibe, Vibe::Solo);
        assert_eq!(filters.window, TimeWindow::Now);
        assert_eq!(filters.distance_miles, 5);
        assert_eq!(filters.indoor_outdoor, IndoorOutdoor::Any);
    }

    #[test]
    fn test_distance_setter_clamps() {
        let mut filters = FilterState::default();
        filters.set_distance_miles(0);
        assert_eq!(filters.distance_miles, 1);
        filters.set_distance_miles(25);
        assert_eq!(filters.distance_miles, 10);
    }

    #[test]
    fn test_enum_wire_values_match_serde() {
        for budget in Budget::ALL {
            let json = serde_json::to_string(&budget).unwrap();
            assert_eq!(json, format!("\"{}\"", budget.as_str()));
        }
        for vibe in Vibe::ALL {
            assert_eq!(serde_json::to_value(vibe).unwrap(), vibe.as_str());
        }
        for window in TimeWindow::ALL {
            assert_eq!(serde_json::to_value(window).unwrap(), window.as_str());
        }
        for setting in IndoorOutdoor::ALL {
            assert_eq!(serde_json::to_value(setting).unwrap(), setting.as_str());
        }
    }

    #[test]
    fn test_budget_labels() {
        assert_eq!(Budget::Under20.label(), "<$20");
        assert_eq!(Budget::Over50.label(), "$50+");
    }

    #[test]
    fn test_generate_request_wire_shape() {
        let filters = FilterState {
            budget: Budget::From20To50,
            vibe: Vibe::Date,
            window: TimeWindow::Tonight,
            distance_miles: 5,
            indoor_outdoor: IndoorOutdoor::Outdoor,
        };
        let request = GenerateRequest::new(Position::new(47.6, -122.3), &filters);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "lat": 47.6,
                "lng": -122.3,
                "budget": "20-50",
                "vibe": "date",
                "window": "tonight",
                "distanceKm": 8,
                "indoorOutdoor": "outdoor"
            })
        );
    }

    #[test]
    fn test_weather_display_suffix() {
        let snapshot = WeatherSnapshot {
            temperature: Some(71.6),
            condition: Some("Sunny".into()),
            ..Default::default()
        };
        assert_eq!(snapshot.display_suffix().as_deref(), Some("72° Sunny"));
        assert!(WeatherSnapshot::default().display_suffix().is_none());
    }

    #[test]
    fn test_places_request_omits_missing_types() {
        let request = PlacesSearchRequest {
            lat: 1.0,
            lng: 2.0,
            radius_meters: 1500,
            types: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"lat":1.0,"lng":2.0,"radiusMeters":1500}"#);
    }

    #[test]
    fn test_place_deserialization_with_optional_fields() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Gas Works Park",
            "categories": ["park"],
            "rating": 4.7,
            "openNow": true,
            "source": "google"
        }))
        .unwrap();
        assert_eq!(place.name, "Gas Works Park");
        assert_eq!(place.open_now, Some(true));
        assert!(place.price_tier.is_none());
    }
}
