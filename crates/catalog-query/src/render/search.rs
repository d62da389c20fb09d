//! Search-engine renderer.
//!
//! Maps criteria onto the engine's query DSL:
//! - `And` / `Or` / `Not` become `bool.must` / `bool.should` / `bool.must_not`
//! - string leaves pick a query kind from their match type
//! - ranges become one `range` query per field

use crate::ir::{ComparisonOperator, Criterion, MatchType, Number, ValueComparison};
use crate::render::query::{
    BackendQuery, BoolQuery, FieldClause, MatchValue, RangeBounds, RangeValue,
};
use crate::render::QueryRenderer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Renderer for the search engine's JSON query DSL.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchRenderer;

impl SearchRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_all(&self, children: &[Criterion]) -> Vec<BackendQuery> {
        children.iter().map(|c| self.render(c)).collect()
    }

    fn render_string(&self, field: &str, value: &str, match_type: MatchType) -> BackendQuery {
        match match_type {
            MatchType::Equals => {
                BackendQuery::MatchPhrase(FieldClause::new(field, value.to_string()))
            }
            MatchType::StartsWith => {
                BackendQuery::MatchPhrasePrefix(FieldClause::new(field, value.to_string()))
            }
            // The value is not escaped; regex metacharacters pass through
            MatchType::EndsWith => {
                BackendQuery::Regexp(FieldClause::new(field, format!(".*{}", value)))
            }
            MatchType::Contains => {
                BackendQuery::Match(FieldClause::new(field, MatchValue::Text(value.to_string())))
            }
        }
    }
}

impl QueryRenderer for SearchRenderer {
    fn name(&self) -> &str {
        "search"
    }

    fn render(&self, criterion: &Criterion) -> BackendQuery {
        match criterion {
            Criterion::And { children } => BackendQuery::Bool(BoolQuery {
                must: self.render_all(children),
                ..Default::default()
            }),
            Criterion::Or { children } => BackendQuery::Bool(BoolQuery {
                should: self.render_all(children),
                ..Default::default()
            }),
            Criterion::Not { child } => BackendQuery::Bool(BoolQuery {
                must_not: vec![self.render(child)],
                ..Default::default()
            }),
            Criterion::StringMatch {
                field,
                value,
                match_type,
            } => self.render_string(field, value, *match_type),
            Criterion::StringMatchAny { field, values } => BackendQuery::Match(FieldClause::new(
                field.as_str(),
                MatchValue::Text(values.join(" ")),
            )),
            Criterion::IntMatch { field, value } => {
                BackendQuery::Match(FieldClause::new(field.as_str(), MatchValue::Int(*value)))
            }
            Criterion::Range { field, comparisons } => BackendQuery::Range(FieldClause::new(
                field.as_str(),
                range_bounds(comparisons, number_value),
            )),
            Criterion::DateRange { field, comparisons } => BackendQuery::Range(FieldClause::new(
                field.as_str(),
                range_bounds(comparisons, date_value),
            )),
        }
    }
}

fn range_bounds<T>(
    comparisons: &[ValueComparison<T>],
    convert: impl Fn(&T) -> RangeValue,
) -> RangeBounds {
    let mut bounds = RangeBounds::default();
    for comparison in comparisons {
        let slot = match comparison.operator {
            ComparisonOperator::Gt => &mut bounds.gt,
            ComparisonOperator::Gte => &mut bounds.gte,
            ComparisonOperator::Lt => &mut bounds.lt,
            ComparisonOperator::Lte => &mut bounds.lte,
        };
        *slot = Some(convert(&comparison.value));
    }
    bounds
}

fn number_value(n: &Number) -> RangeValue {
    match *n {
        Number::Int(i) => RangeValue::Int(i),
        Number::Float(x) => RangeValue::Float(x),
    }
}

/// `yyyy-MM-ddTHH:mm:ss[.fraction]Z`
fn date_value(dt: &DateTime<Utc>) -> RangeValue {
    RangeValue::Date(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn render_json(criterion: &Criterion) -> Value {
        SearchRenderer::new().render(criterion).to_json().unwrap()
    }

    #[test]
    fn test_equals_is_match_phrase() {
        assert_eq!(
            render_json(&Criterion::eq("field", "value")),
            json!({"match_phrase": {"field": "value"}})
        );
    }

    #[test]
    fn test_starts_with_is_phrase_prefix() {
        assert_eq!(
            render_json(&Criterion::starts_with("title", "mar")),
            json!({"match_phrase_prefix": {"title": "mar"}})
        );
    }

    #[test]
    fn test_ends_with_is_unescaped_regexp() {
        assert_eq!(
            render_json(&Criterion::ends_with("title", "a.b")),
            json!({"regexp": {"title": ".*a.b"}})
        );
    }

    #[test]
    fn test_contains_is_match() {
        assert_eq!(
            render_json(&Criterion::contains("title", "mars")),
            json!({"match": {"title": "mars"}})
        );
    }

    #[test]
    fn test_any_of_joins_values() {
        assert_eq!(
            render_json(&Criterion::any_of("tags", ["red", "green"])),
            json!({"match": {"tags": "red green"}})
        );
    }

    #[test]
    fn test_boolean_nesting() {
        let criterion = Criterion::and([
            Criterion::int_eq("a", 1),
            Criterion::or([Criterion::int_eq("b", 2), Criterion::int_eq("c", 3)]),
            Criterion::not(Criterion::eq("title", "x")),
        ]);
        assert_eq!(
            render_json(&criterion),
            json!({"bool": {"must": [
                {"match": {"a": 1}},
                {"bool": {"should": [{"match": {"b": 2}}, {"match": {"c": 3}}]}},
                {"bool": {"must_not": [{"match_phrase": {"title": "x"}}]}}
            ]}})
        );
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(
            render_json(&Criterion::between("altitude", 1i64, true, 10i64, false)),
            json!({"range": {"altitude": {"gte": 1, "lt": 10}}})
        );
        assert_eq!(
            render_json(&Criterion::gt("bpm", 60.5f64)),
            json!({"range": {"bpm": {"gt": 60.5}}})
        );
    }

    #[test]
    fn test_date_range_uses_utc_designator() {
        let criterion = Criterion::date_range(
            "date",
            vec![
                ValueComparison::new(
                    ComparisonOperator::Gte,
                    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
                ),
                ValueComparison::new(
                    ComparisonOperator::Lt,
                    Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap()
                        + chrono::Duration::milliseconds(250),
                ),
            ],
        );
        assert_eq!(
            render_json(&criterion),
            json!({"range": {"date": {
                "gte": "2020-01-01T00:00:00Z",
                "lt": "2020-12-31T23:59:59.250Z"
            }}})
        );
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let criterion = Criterion::or([
            Criterion::contains("title", "mars"),
            Criterion::le("altitude", 5i64),
        ]);
        let renderer = SearchRenderer::new();
        let first = renderer.render(&criterion).to_json_string().unwrap();
        let second = renderer.render(&criterion).to_json_string().unwrap();
        assert_eq!(first, second);
    }
}
