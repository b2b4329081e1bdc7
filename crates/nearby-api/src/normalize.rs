//! Normalization of loosely shaped backend payloads.
//!
//! The generate endpoint has answered with both a bare array of ideas and an
//! object wrapping them in `ideas`, with several spellings of the same field.
//! The response shape is resolved once into [`GenerateResponseShape`], then
//! every raw record goes through [`normalize`], which never fails.

use serde_json::{Map, Value};

use crate::types::{EventIdea, IdeaLink, WeatherSnapshot};

/// Structural variants accepted from `/api/generate`
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateResponseShape {
    /// `[ {...}, ... ]`
    Array(Vec<Value>),
    /// `{ "ideas": [ {...}, ... ] }`
    ObjectWithIdeas(Vec<Value>),
    Unrecognized,
}

impl GenerateResponseShape {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Array(items),
            Value::Object(mut map) => match map.remove("ideas") {
                Some(Value::Array(items)) => Self::ObjectWithIdeas(items),
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }

    /// Raw records, or `None` for an unrecognized shape
    pub fn into_records(self) -> Option<Vec<Value>> {
        match self {
            Self::Array(items) | Self::ObjectWithIdeas(items) => Some(items),
            Self::Unrecognized => None,
        }
    }
}

/// Read-only view over one raw record. Non-object values read as empty.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    /// Field as text. Strings are taken verbatim, numbers and booleans are
    /// rendered; null, missing, arrays and objects read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields?.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`text`](Self::text) but treats the empty string as absent
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.is_empty())
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields?.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.fields?.get(key)?.as_array()
    }
}

/// Build the canonical idea for the record at `index` in its batch.
///
/// `id` falls back from `id` to `placeId` to `"{title}-{index}"` (or
/// `"idea-{index}"` without a title), so ids stay unique within a batch.
pub fn normalize(raw: &Value, index: usize) -> EventIdea {
    let record = RawRecord::new(raw);
    let title = record.text("title").unwrap_or_default();

    let id = record
        .non_empty_text("id")
        .or_else(|| record.non_empty_text("placeId"))
        .unwrap_or_else(|| {
            let stem = if title.is_empty() { "idea" } else { title.as_str() };
            format!("{}-{}", stem, index)
        });

    let links = record
        .array("links")
        .map(|entries| entries.iter().map(normalize_link).collect())
        .unwrap_or_default();

    EventIdea {
        id,
        category: record.text("category").unwrap_or_default(),
        cost: record
            .text("cost")
            .or_else(|| record.text("costTier"))
            .unwrap_or_default(),
        why_today: record.text("whyToday").unwrap_or_default(),
        links,
        title,
    }
}

/// Normalize a whole batch, keeping order
pub fn normalize_all(records: &[Value]) -> Vec<EventIdea> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize(raw, index))
        .collect()
}

fn normalize_link(raw: &Value) -> IdeaLink {
    let record = RawRecord::new(raw);
    IdeaLink {
        name: record
            .text("name")
            .or_else(|| record.text("type"))
            .unwrap_or_else(|| "link".to_string()),
        url: record.text("url").unwrap_or_default(),
    }
}

/// Pull the display fields out of a weather payload.
/// Returns `None` when the payload is not an object.
pub fn normalize_weather(raw: &Value) -> Option<WeatherSnapshot> {
    raw.as_object()?;
    let record = RawRecord::new(raw);

    Some(WeatherSnapshot {
        temperature: record
            .number("temperature")
            .or_else(|| record.number("tempF"))
            .or_else(|| record.number("temp")),
        condition: record
            .non_empty_text("condition")
            .or_else(|| record.non_empty_text("summary")),
        precip_chance: record.number("precipChance"),
        sunrise_iso: record.non_empty_text("sunriseIso"),
        sunset_iso: record.non_empty_text("sunsetIso"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_title_and_index() {
        assert_eq!(normalize(&json!({"title": "Picnic"}), 2).id, "Picnic-2");
    }

    #[test]
    fn test_id_without_title() {
        assert_eq!(normalize(&json!({}), 3).id, "idea-3");
        assert_eq!(normalize(&json!({"title": ""}), 0).id, "idea-0");
    }

    #[test]
    fn test_explicit_id_wins_over_place_id() {
        assert_eq!(normalize(&json!({"id": "x1", "placeId": "p1"}), 0).id, "x1");
        assert_eq!(normalize(&json!({"id": null, "placeId": "p1"}), 0).id, "p1");
    }

    #[test]
    fn test_numeric_id_is_rendered() {
        assert_eq!(normalize(&json!({"id": 42}), 0).id, "42");
    }

    #[test]
    fn test_cost_fallback() {
        assert_eq!(normalize(&json!({"costTier": "$"}), 0).cost, "$");
        assert_eq!(normalize(&json!({"cost": "free", "costTier": "$$"}), 0).cost, "free");
        assert_eq!(normalize(&json!({}), 0).cost, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let idea = normalize(&json!({"title": "Walk"}), 0);
        assert_eq!(idea.category, "");
        assert_eq!(idea.why_today, "");
        assert!(idea.links.is_empty());
    }

    #[test]
    fn test_full_record() {
        let idea = normalize(
            &json!({
                "title": "Sunset kayak",
                "category": "outdoors",
                "costTier": "$$",
                "duration": "2h",
                "whyToday": "Clear skies until 9pm",
                "placeId": "ChIJ123",
                "links": [{"type": "maps", "url": "https://maps.example/k"}]
            }),
            0,
        );
        assert_eq!(idea.id, "ChIJ123");
        assert_eq!(idea.category, "outdoors");
        assert_eq!(idea.cost, "$$");
        assert_eq!(idea.why_today, "Clear skies until 9pm");
        assert_eq!(
            idea.links,
            vec![IdeaLink {
                name: "maps".into(),
                url: "https://maps.example/k".into()
            }]
        );
    }

    #[test]
    fn test_link_name_fallbacks() {
        let idea = normalize(
            &json!({"links": [
                {"name": "Tickets", "type": "web", "url": "a"},
                {"type": "web", "url": "b"},
                {"url": "c"},
                "not-an-object",
                {"name": null}
            ]}),
            0,
        );
        let names: Vec<_> = idea.links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Tickets", "web", "link", "link", "link"]);
        assert_eq!(idea.links[3].url, "");
    }

    #[test]
    fn test_links_not_an_array() {
        assert!(normalize(&json!({"links": "https://x"}), 0).links.is_empty());
        assert!(normalize(&json!({"links": {"url": "x"}}), 0).links.is_empty());
    }

    #[test]
    fn test_non_object_record() {
        let idea = normalize(&json!("just a string"), 1);
        assert_eq!(idea.id, "idea-1");
        assert_eq!(idea.title, "");
    }

    #[test]
    fn test_batch_ids_are_unique_without_identifiers() {
        let ideas = normalize_all(&[json!({"title": "A"}), json!({"title": "A"}), json!({})]);
        assert_eq!(ideas[0].id, "A-0");
        assert_eq!(ideas[1].id, "A-1");
        assert_eq!(ideas[2].id, "idea-2");
    }

    #[test]
    fn test_shape_variants() {
        assert_eq!(
            GenerateResponseShape::from_value(json!([{"title": "A"}])),
            GenerateResponseShape::Array(vec![json!({"title": "A"})])
        );
        assert_eq!(
            GenerateResponseShape::from_value(json!({"ideas": [{"title": "A"}]})),
            GenerateResponseShape::ObjectWithIdeas(vec![json!({"title": "A"})])
        );
        assert_eq!(
            GenerateResponseShape::from_value(json!({"foo": 1})),
            GenerateResponseShape::Unrecognized
        );
        assert_eq!(
            GenerateResponseShape::from_value(json!({"ideas": "none"})),
            GenerateResponseShape::Unrecognized
        );
        assert_eq!(
            GenerateResponseShape::from_value(json!(null)),
            GenerateResponseShape::Unrecognized
        );
    }

    #[test]
    fn test_weather_field_variants() {
        let snapshot = normalize_weather(&json!({
            "tempF": 64.5,
            "precipChance": 0.2,
            "summary": "Partly cloudy",
            "sunriseIso": "2026-10-16T07:31:00-07:00"
        }))
        .unwrap();
        assert_eq!(snapshot.temperature, Some(64.5));
        assert_eq!(snapshot.condition.as_deref(), Some("Partly cloudy"));
        assert_eq!(snapshot.precip_chance, Some(0.2));
        assert!(snapshot.sunset_iso.is_none());

        let snapshot = normalize_weather(&json!({"temperature": "70", "condition": "Sunny"})).unwrap();
        assert_eq!(snapshot.temperature, Some(70.0));
        assert_eq!(snapshot.condition.as_deref(), Some("Sunny"));
    }

    #[test]
    fn test_weather_rejects_non_object() {
        assert!(normalize_weather(&json!([1, 2])).is_none());
    }
}
