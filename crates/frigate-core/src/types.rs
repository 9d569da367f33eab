use serde::Deserialize;
use serde_json::{Map, Value};

/// Truncates toward zero. `None` for non-finite values or anything outside
/// the `i64` range.
pub fn whole_seconds(secs: f64) -> Option<i64> {
    let truncated = secs.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// A `start_time`/`end_time` exactly as the API sent it.
///
/// Frigate normally sends epoch seconds as a float, but the value can be
/// missing, null or a string. The accessors decide how much of it is usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTimestamp(Value);

impl RawTimestamp {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Numeric reading: a JSON number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Whole-second reading: integer numbers, floats truncated toward zero,
    /// or strings holding an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(whole_seconds)),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Text form used when the timestamp ends up inside a file name.
    pub fn display(&self) -> String {
        scalar_text(&self.0)
    }
}

/// GenAI enrichment attached to a review item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub scene: String,
    pub time: String,
    pub threat_level: String,
}

impl Metadata {
    /// Only a non-empty JSON object counts as metadata.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object().filter(|map| !map.is_empty())?;
        Some(Self {
            title: text_field(map, "title"),
            scene: text_field(map, "scene"),
            time: text_field(map, "time"),
            threat_level: text_field(map, "potential_threat_level"),
        })
    }
}

/// One review item from `/api/review`, reduced to the fields the day log uses.
///
/// Deserializing never fails: anything that is not an object, and any field
/// with an unexpected shape, falls back to an empty default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ReviewEvent {
    pub id: String,
    pub camera: String,
    pub severity: String,
    pub start_time: RawTimestamp,
    pub end_time: RawTimestamp,
    pub thumb_path: Option<String>,
    pub objects: Vec<String>,
    pub metadata: Option<Metadata>,
}

impl ReviewEvent {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let data = map.get("data").and_then(Value::as_object);

        Self {
            id: text_field(map, "id"),
            camera: text_field(map, "camera"),
            severity: text_field(map, "severity"),
            start_time: RawTimestamp::new(map.get("start_time").cloned().unwrap_or_default()),
            end_time: RawTimestamp::new(map.get("end_time").cloned().unwrap_or_default()),
            thumb_path: Some(text_field(map, "thumb_path")).filter(|path| !path.is_empty()),
            objects: data.map(object_labels).unwrap_or_default(),
            metadata: data
                .and_then(|data| data.get("metadata"))
                .and_then(Metadata::from_value),
        }
    }

    /// Normalizes a review API body: a bare array, an object wrapping an
    /// `events` array, or anything else (no events).
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        let items = match body {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("events") {
                Some(Value::Array(items)) => items,
                _ => return Vec::new(),
            },
            _ => return Vec::new(),
        };
        items.iter().map(Self::from_value).collect()
    }
}

impl From<Value> for ReviewEvent {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

fn object_labels(data: &Map<String, Value>) -> Vec<String> {
    match data.get("objects") {
        Some(Value::Array(labels)) => labels
            .iter()
            .filter(|label| !label.is_null() && !label.is_array() && !label.is_object())
            .map(scalar_text)
            .collect(),
        _ => Vec::new(),
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_event() -> Value {
        json!({
            "id": "1714567890.123-abc123",
            "camera": "driveway",
            "start_time": 1714567890.123,
            "end_time": 1714567912.5,
            "severity": "alert",
            "thumb_path": "/media/frigate/clips/review/thumb-driveway-1714567890.123-abc123.webp",
            "data": {
                "objects": ["person", "car"],
                "metadata": {
                    "title": "Person at the gate",
                    "scene": "A person walks up the driveway.",
                    "time": "Wednesday, 01:31 PM",
                    "potential_threat_level": 1
                }
            }
        })
    }

    #[test]
    fn test_full_event_extraction() {
        let event = ReviewEvent::from_value(&sample_event());

        assert_eq!(event.id, "1714567890.123-abc123");
        assert_eq!(event.camera, "driveway");
        assert_eq!(event.severity, "alert");
        assert_eq!(event.objects, vec!["person", "car"]);
        assert_eq!(event.start_time.as_f64(), Some(1714567890.123));

        let metadata = event.metadata.unwrap();
        assert_eq!(metadata.title, "Person at the gate");
        assert_eq!(metadata.threat_level, "1");
    }

    #[test]
    fn test_missing_fields_default() {
        let event = ReviewEvent::from_value(&json!({ "camera": "porch" }));

        assert_eq!(event.camera, "porch");
        assert_eq!(event.id, "");
        assert_eq!(event.severity, "");
        assert!(event.thumb_path.is_none());
        assert!(event.objects.is_empty());
        assert!(event.metadata.is_none());
        assert_eq!(event.start_time.as_f64(), None);
        assert_eq!(event.start_time.display(), "");
    }

    #[test]
    fn test_non_object_event_is_default() {
        assert_eq!(ReviewEvent::from_value(&json!("garbage")), ReviewEvent::default());
        assert_eq!(ReviewEvent::from_value(&Value::Null), ReviewEvent::default());
    }

    #[test]
    fn test_empty_or_null_metadata_is_absent() {
        let empty = json!({ "data": { "metadata": {} } });
        let null = json!({ "data": { "metadata": null } });
        let text = json!({ "data": { "metadata": "n/a" } });

        assert!(ReviewEvent::from_value(&empty).metadata.is_none());
        assert!(ReviewEvent::from_value(&null).metadata.is_none());
        assert!(ReviewEvent::from_value(&text).metadata.is_none());
    }

    #[test]
    fn test_partial_metadata_fields_default_to_empty() {
        let event = ReviewEvent::from_value(&json!({
            "data": { "metadata": { "scene": "Empty yard." } }
        }));
        let metadata = event.metadata.unwrap();
        assert_eq!(metadata.scene, "Empty yard.");
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.threat_level, "");
    }

    #[test]
    fn test_odd_object_labels() {
        let event = ReviewEvent::from_value(&json!({
            "data": { "objects": ["person", null, 3, ["nested"]] }
        }));
        assert_eq!(event.objects, vec!["person", "3"]);
    }

    #[test]
    fn test_empty_thumb_path_is_absent() {
        let event = ReviewEvent::from_value(&json!({ "thumb_path": "" }));
        assert!(event.thumb_path.is_none());
    }

    #[test]
    fn test_raw_timestamp_readings() {
        let float = RawTimestamp::new(json!(1714567890.9));
        assert_eq!(float.as_i64(), Some(1714567890));
        assert_eq!(float.display(), "1714567890.9");

        let int_text = RawTimestamp::new(json!(" 1714567890 "));
        assert_eq!(int_text.as_f64(), Some(1714567890.0));
        assert_eq!(int_text.as_i64(), Some(1714567890));

        let float_text = RawTimestamp::new(json!("1714567890.5"));
        assert_eq!(float_text.as_i64(), None);

        let garbage = RawTimestamp::new(json!("soon"));
        assert_eq!(garbage.as_f64(), None);
        assert_eq!(garbage.as_i64(), None);
        assert_eq!(garbage.display(), "soon");
    }

    #[test]
    fn test_whole_seconds_truncates_toward_zero() {
        assert_eq!(whole_seconds(12.9), Some(12));
        assert_eq!(whole_seconds(-12.5), Some(-12));
        assert_eq!(whole_seconds(f64::NAN), None);
        assert_eq!(whole_seconds(f64::INFINITY), None);
        assert_eq!(whole_seconds(1e19), None);
        assert_eq!(RawTimestamp::new(json!(-7.5)).as_i64(), Some(-7));
        assert_eq!(RawTimestamp::new(json!(1e19)).as_i64(), None);
    }

    #[test]
    fn test_response_shapes() {
        let list = json!([sample_event(), { "camera": "porch" }]);
        let wrapped = json!({ "events": [sample_event()] });
        let wrapped_odd = json!({ "events": { "camera": "porch" } });
        let other = json!({ "detail": "nope" });

        assert_eq!(ReviewEvent::list_from_response(&list).len(), 2);
        assert_eq!(ReviewEvent::list_from_response(&wrapped).len(), 1);
        assert!(ReviewEvent::list_from_response(&wrapped_odd).is_empty());
        assert!(ReviewEvent::list_from_response(&other).is_empty());
        assert!(ReviewEvent::list_from_response(&json!(42)).is_empty());
    }

    #[test]
    fn test_deserialize_tolerates_bad_items() {
        let events: Vec<ReviewEvent> =
            serde_json::from_value(json!([sample_event(), 7, null])).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].camera, "driveway");
        assert_eq!(events[1], ReviewEvent::default());
    }
}
