//! Composable multi-field filter over visualisation items.
//!
//! An item is visible when all seven predicates accept it. Criteria are always
//! fully specified; each field has a neutral value that accepts everything.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use constants::galaxy::MILLIS_PER_DAY;
use serde::{Deserialize, Serialize};

use super::item::{ClusterKey, VisualizationItem};
use crate::error::GalaxyError;

/// Either the neutral "all" value or one specific value to match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

/// Elapsed-days bucket shared by the add-date and review-date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBucket {
    #[default]
    All,
    Never,
    Today,
    Week,
    Month,
}

impl DateBucket {
    /// Inclusive upper bound in whole days for the timed buckets.
    fn max_days(self) -> Option<i64> {
        match self {
            Self::Today => Some(1),
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::All | Self::Never => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Never => "never",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn accepts(self, date: Option<&DateTime<Utc>>, now: &DateTime<Utc>) -> bool {
        match (self, date) {
            (Self::All, _) => true,
            (Self::Never, date) => date.is_none(),
            (_, None) => false,
            (bucket, Some(date)) => {
                let days = elapsed_days(date, now);
                bucket.max_days().is_none_or(|max| days <= max)
            }
        }
    }
}

impl FromStr for DateBucket {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "never" => Ok(Self::Never),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(GalaxyError::UnknownFilterValue {
                field: "date",
                value: other.to_string(),
            }),
        }
    }
}

/// Whole days between two instants, rounded up, regardless of direction.
pub fn elapsed_days(date: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    let millis = (*now - *date).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// SRS proficiency bucket; both ends of each range are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SrsBucket {
    #[default]
    All,
    Zero,
    OneToThree,
    FourToSix,
    SevenPlus,
}

impl SrsBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Zero => "0",
            Self::OneToThree => "1-3",
            Self::FourToSix => "4-6",
            Self::SevenPlus => "7+",
        }
    }

    pub fn accepts(self, level: u32) -> bool {
        match self {
            Self::All => true,
            Self::Zero => level == 0,
            Self::OneToThree => (1..=3).contains(&level),
            Self::FourToSix => (4..=6).contains(&level),
            Self::SevenPlus => level >= 7,
        }
    }
}

impl FromStr for SrsBucket {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "0" => Ok(Self::Zero),
            "1-3" => Ok(Self::OneToThree),
            "4-6" => Ok(Self::FourToSix),
            "7+" => Ok(Self::SevenPlus),
            other => Err(GalaxyError::UnknownFilterValue {
                field: "srsLevel",
                value: other.to_string(),
            }),
        }
    }
}

/// Snapshot of every filter control. `Default` is the all-neutral criteria.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub cluster: Choice<ClusterKey>,
    pub word_type: Choice<String>,
    pub add_date: DateBucket,
    pub review_date: DateBucket,
    pub srs_level: SrsBucket,
    /// Exact-match token set by the component drill-down; survives data refreshes.
    pub component: Option<String>,
    /// Case-insensitive substring over display text, translation and romanization.
    pub search: String,
}

impl FilterCriteria {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Host-side string form of the criteria, as produced by the filter controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteriaParams {
    pub cluster: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub word_type: Option<String>,
    pub add_date: Option<String>,
    pub review_date: Option<String>,
    pub srs_level: Option<String>,
    pub search: Option<String>,
}

impl FilterCriteriaParams {
    /// Resolve into full criteria; omitted fields take their neutral value.
    pub fn into_criteria(self, component: Option<String>) -> Result<FilterCriteria, GalaxyError> {
        let cluster = match self.cluster {
            None | Some(serde_json::Value::Null) => Choice::All,
            Some(serde_json::Value::String(ref s)) if s == "all" => Choice::All,
            Some(value) => match ClusterKey::from_json(&value) {
                Some(key) => Choice::Only(key),
                None => {
                    return Err(GalaxyError::UnknownFilterValue {
                        field: "cluster",
                        value: value.to_string(),
                    });
                }
            },
        };

        let word_type = match self.word_type {
            None => Choice::All,
            Some(t) if t == "all" => Choice::All,
            Some(t) => Choice::Only(t),
        };

        Ok(FilterCriteria {
            cluster,
            word_type,
            add_date: parse_or_default(self.add_date.as_deref())?,
            review_date: parse_or_default(self.review_date.as_deref())?,
            srs_level: parse_or_default(self.srs_level.as_deref())?,
            component: component.filter(|c| !c.is_empty()),
            search: self.search.unwrap_or_default(),
        })
    }
}

impl From<&FilterCriteria> for FilterCriteriaParams {
    /// Control-value form of the active criteria, echoed back to the host.
    fn from(criteria: &FilterCriteria) -> Self {
        let cluster: serde_json::Value = match &criteria.cluster {
            Choice::All => "all".into(),
            Choice::Only(key) => key.as_str().into(),
        };
        let word_type = match &criteria.word_type {
            Choice::All => "all".to_string(),
            Choice::Only(t) => t.clone(),
        };

        Self {
            cluster: Some(cluster),
            word_type: Some(word_type),
            add_date: Some(criteria.add_date.as_str().to_string()),
            review_date: Some(criteria.review_date.as_str().to_string()),
            srs_level: Some(criteria.srs_level.as_str().to_string()),
            search: Some(criteria.search.clone()),
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>) -> Result<T, GalaxyError>
where
    T: FromStr<Err = GalaxyError> + Default,
{
    raw.map_or_else(|| Ok(T::default()), str::parse)
}

/// Evaluate the criteria against the current wall clock.
pub fn accepts(item: &VisualizationItem, criteria: &FilterCriteria) -> bool {
    accepts_at(item, criteria, &Utc::now())
}

/// Conjunction of all predicates, cheapest first; `now` anchors the date buckets.
pub fn accepts_at(item: &VisualizationItem, criteria: &FilterCriteria, now: &DateTime<Utc>) -> bool {
    cluster_matches(item, &criteria.cluster)
        && word_type_matches(item, &criteria.word_type)
        && criteria.srs_level.accepts(item.srs_level_or_default())
        && criteria.add_date.accepts(item.add_date.as_ref(), now)
        && criteria.review_date.accepts(item.last_review_date.as_ref(), now)
        && component_matches(item, criteria.component.as_deref())
        && search_matches(item, &criteria.search)
}

fn cluster_matches(item: &VisualizationItem, cluster: &Choice<ClusterKey>) -> bool {
    match cluster {
        Choice::All => true,
        Choice::Only(wanted) => item
            .cluster
            .as_ref()
            .is_some_and(|key| key.loosely_eq(wanted)),
    }
}

fn word_type_matches(item: &VisualizationItem, word_type: &Choice<String>) -> bool {
    match word_type {
        Choice::All => true,
        Choice::Only(wanted) => item.word_type.as_deref() == Some(wanted.as_str()),
    }
}

fn component_matches(item: &VisualizationItem, component: Option<&str>) -> bool {
    let Some(token) = component else {
        return true;
    };
    item.display_text == token || item.component_parts.iter().any(|part| part == token)
}

fn search_matches(item: &VisualizationItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    item.display_text.to_lowercase().contains(&query)
        || item.translation_text.to_lowercase().contains(&query)
        || item
            .romanization_text
            .as_deref()
            .is_some_and(|rom| rom.to_lowercase().contains(&query))
}
