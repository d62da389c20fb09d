//! Search-engine query document.
//!
//! Serializes to the engine's JSON dialect:
//!
//! ```text
//! { "bool": { "must": [...], "should": [...], "must_not": [...] } }
//! { "match_phrase": { "title": "mars rover" } }
//! { "range": { "altitude": { "gte": 1000, "lt": 2000 } } }
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Compiled query, ready to hand to the search engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendQuery {
    Bool(BoolQuery),
    MatchPhrase(FieldClause<String>),
    MatchPhrasePrefix(FieldClause<String>),
    Regexp(FieldClause<String>),
    Match(FieldClause<MatchValue>),
    Range(FieldClause<RangeBounds>),
}

impl BackendQuery {
    /// JSON value of this query
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Compact JSON text of this query
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Boolean combination; empty clause lists are omitted from the output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<BackendQuery>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<BackendQuery>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<BackendQuery>,
}

/// A `{ field: value }` pair, serialized as a single-entry map
#[derive(Debug, Clone, PartialEq)]
pub struct FieldClause<T> {
    pub field: String,
    pub value: T,
}

impl<T> FieldClause<T> {
    pub fn new(field: impl Into<String>, value: T) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

impl<T: Serialize> Serialize for FieldClause<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// Search text of a `match` query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchValue {
    Text(String),
    Int(i64),
}

/// Bound of a `range` query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RangeValue {
    Int(i64),
    Float(f64),
    /// ISO-8601 instant with explicit UTC offset
    Date(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<RangeValue>,
}
