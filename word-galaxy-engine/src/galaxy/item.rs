//! Word records as served by the backend and their renderable projection.
//!
//! Conversion from the wire format is total: every malformed or missing field
//! resolves to a documented default instead of rejecting the word.

use bevy::math::Vec3;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GalaxyResult;

/// Cluster grouping key, normalised to text so numeric and string ids compare alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterKey(String);

impl ClusterKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a JSON id that may be a number, a string or null.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Some(Self(int.to_string()))
                } else {
                    number.as_f64().map(|float| {
                        if float.fract() == 0.0 {
                            Self((float as i64).to_string())
                        } else {
                            Self(float.to_string())
                        }
                    })
                }
            }
            serde_json::Value::String(text) if !text.is_empty() => Some(Self(text.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form used for palette lookup.
    pub fn as_index(&self) -> Option<i64> {
        let trimmed = self.0.trim();
        trimmed.parse::<i64>().ok().or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    /// Equality that treats `"3"`, `"3.0"` and `3` as the same cluster.
    pub fn loosely_eq(&self, other: &ClusterKey) -> bool {
        if self.0 == other.0 {
            return true;
        }
        match (self.0.trim().parse::<f64>(), other.0.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One word's renderable projection plus the read-only fields the filters inspect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationItem {
    pub id: u64,
    /// Normalised coordinate, each axis expected in [-1, 1].
    pub position: Vec3,
    pub cluster: Option<ClusterKey>,
    pub cluster_label: Option<String>,
    pub display_text: String,
    pub translation_text: String,
    pub romanization_text: Option<String>,
    pub word_type: Option<String>,
    pub add_date: Option<DateTime<Utc>>,
    pub last_review_date: Option<DateTime<Utc>>,
    pub srs_level: Option<u32>,
    pub component_parts: Vec<String>,
}

impl VisualizationItem {
    pub fn new(
        id: u64,
        display_text: impl Into<String>,
        translation_text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            cluster: None,
            cluster_label: None,
            display_text: display_text.into(),
            translation_text: translation_text.into(),
            romanization_text: None,
            word_type: None,
            add_date: None,
            last_review_date: None,
            srs_level: None,
            component_parts: Vec::new(),
        }
    }

    /// SRS level with the documented default for words never graded.
    pub fn srs_level_or_default(&self) -> u32 {
        self.srs_level.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordText {
    #[serde(default)]
    pub thai: Option<String>,
    #[serde(default)]
    pub french: Option<String>,
}

/// Generated flashcard details; only the fields the galaxy filters on are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashcardInfos {
    #[serde(default)]
    pub word_type: Option<String>,
    #[serde(default)]
    pub romanization: Option<String>,
    /// `[parts, translations]` pair; kept loose because older records vary.
    #[serde(default)]
    pub components: Option<serde_json::Value>,
}

/// Backend word info record, as serialised by the map-data endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: u64,
    #[serde(default)]
    pub word: WordText,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
    #[serde(default)]
    pub cluster_id: Option<serde_json::Value>,
    #[serde(default)]
    pub cluster_label: Option<String>,
    #[serde(default)]
    pub flashcard_infos: Option<FlashcardInfos>,
    #[serde(default)]
    pub srs_level: Option<i64>,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub last_review_date: Option<String>,
}

impl From<WordRecord> for VisualizationItem {
    fn from(record: WordRecord) -> Self {
        let infos = record.flashcard_infos.unwrap_or_default();

        Self {
            id: record.id,
            position: Vec3::new(
                record.x.unwrap_or(0.0),
                record.y.unwrap_or(0.0),
                record.z.unwrap_or(0.0),
            ),
            cluster: record.cluster_id.as_ref().and_then(ClusterKey::from_json),
            cluster_label: record.cluster_label,
            display_text: record.word.thai.unwrap_or_default(),
            translation_text: record.word.french.unwrap_or_default(),
            romanization_text: infos.romanization.filter(|r| !r.is_empty()),
            word_type: infos.word_type.filter(|t| !t.is_empty()),
            add_date: record.add_date.as_deref().and_then(parse_timestamp),
            last_review_date: record.last_review_date.as_deref().and_then(parse_timestamp),
            srs_level: record.srs_level.map(|level| level.clamp(0, u32::MAX as i64) as u32),
            component_parts: infos
                .components
                .as_ref()
                .map(component_parts)
                .unwrap_or_default(),
        }
    }
}

/// First element of the components pair, when it is a list of strings.
fn component_parts(components: &serde_json::Value) -> Vec<String> {
    components
        .get(0)
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Parse backend timestamps: RFC 3339, naive ISO date-times (taken as UTC) or bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    bevy::log::debug!("Unparseable timestamp treated as absent: {}", raw);
    None
}

pub fn items_from_records(records: Vec<WordRecord>) -> Vec<VisualizationItem> {
    records.into_iter().map(VisualizationItem::from).collect()
}

/// Parse a JSON array of word records into a fresh collection.
pub fn items_from_json(value: serde_json::Value) -> GalaxyResult<Vec<VisualizationItem>> {
    let records: Vec<WordRecord> = serde_json::from_value(value)?;
    Ok(items_from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn full_record_maps_every_field() {
        let items = items_from_json(json!([{
            "id": 7,
            "word": {"id": 3, "thai": "ภาษา", "french": "langue"},
            "x": 0.5, "y": -0.25, "z": 1.0,
            "cluster_id": 4,
            "cluster_label": "Language",
            "flashcard_infos": {
                "word_type": "noun",
                "romanization": "phasa",
                "components": [["ภา", "ษา"], ["a", "b"]]
            },
            "srs_level": 5,
            "add_date": "2025-03-01T10:00:00Z",
            "last_review_date": null
        }]))
        .unwrap();

        let item = &items[0];
        assert_eq!(item.id, 7);
        assert_eq!(item.position, Vec3::new(0.5, -0.25, 1.0));
        assert_eq!(item.cluster, Some(ClusterKey::new("4")));
        assert_eq!(item.display_text, "ภาษา");
        assert_eq!(item.translation_text, "langue");
        assert_eq!(item.romanization_text.as_deref(), Some("phasa"));
        assert_eq!(item.word_type.as_deref(), Some("noun"));
        assert_eq!(item.srs_level, Some(5));
        assert_eq!(item.component_parts, vec!["ภา".to_string(), "ษา".to_string()]);
        assert_eq!(
            item.add_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(item.last_review_date, None);
    }

    #[test]
    fn sparse_record_falls_back_to_defaults() {
        let items = items_from_json(json!([{"id": 1, "word": {"thai": "น้ำ"}, "x": 0.3}])).unwrap();
        let item = &items[0];

        assert_eq!(item.position, Vec3::new(0.3, 0.0, 0.0));
        assert_eq!(item.cluster, None);
        assert_eq!(item.srs_level_or_default(), 0);
        assert!(item.component_parts.is_empty());
        assert_eq!(item.translation_text, "");
    }

    #[test]
    fn cluster_ids_compare_loosely() {
        let numeric = ClusterKey::from_json(&json!(3)).unwrap();
        let text = ClusterKey::from_json(&json!("3")).unwrap();
        let float = ClusterKey::from_json(&json!(3.0)).unwrap();

        assert!(numeric.loosely_eq(&text));
        assert!(float.loosely_eq(&text));
        assert!(!numeric.loosely_eq(&ClusterKey::new("4")));
        assert_eq!(numeric.as_index(), Some(3));
        assert_eq!(ClusterKey::from_json(&json!(null)), None);
    }

    #[test]
    fn timestamps_accept_backend_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-12-31"), Some(expected));
        assert_eq!(parse_timestamp("2024-12-31T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-12-31T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn malformed_components_are_ignored() {
        let items = items_from_json(json!([
            {"id": 1, "flashcard_infos": {"components": "n/a"}},
            {"id": 2, "flashcard_infos": {"components": [[1, "ก"]]}}
        ]))
        .unwrap();

        assert!(items[0].component_parts.is_empty());
        assert_eq!(items[1].component_parts, vec!["ก".to_string()]);
    }
}
