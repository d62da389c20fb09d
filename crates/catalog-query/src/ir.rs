//! Criterion IR.
//!
//! Backend-agnostic boolean tree produced by the translators and consumed by
//! the renderers. Every leaf names a field that was resolved against the
//! metadata catalog; a tree with an unknown field is never built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a string leaf compares against the field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Equals,
    StartsWith,
    EndsWith,
    Contains,
}

/// Bound operator of a range comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOperator {
    /// Operator for a lower bound
    pub fn lower(inclusive: bool) -> Self {
        if inclusive {
            Self::Gte
        } else {
            Self::Gt
        }
    }

    /// Operator for an upper bound
    pub fn upper(inclusive: bool) -> Self {
        if inclusive {
            Self::Lte
        } else {
            Self::Lt
        }
    }
}

/// Numeric bound value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

/// An operator paired with its bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueComparison<T> {
    pub operator: ComparisonOperator,
    pub value: T,
}

impl<T> ValueComparison<T> {
    pub fn new(operator: ComparisonOperator, value: T) -> Self {
        Self { operator, value }
    }
}

/// Search criterion tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    And {
        children: Vec<Criterion>,
    },
    Or {
        children: Vec<Criterion>,
    },
    Not {
        child: Box<Criterion>,
    },
    StringMatch {
        field: String,
        value: String,
        match_type: MatchType,
    },
    /// Matches if any of `values` occurs in the field
    StringMatchAny {
        field: String,
        values: Vec<String>,
    },
    IntMatch {
        field: String,
        value: i64,
    },
    Range {
        field: String,
        comparisons: Vec<ValueComparison<Number>>,
    },
    DateRange {
        field: String,
        comparisons: Vec<ValueComparison<DateTime<Utc>>>,
    },
}

impl Criterion {
    pub fn and(children: impl IntoIterator<Item = Criterion>) -> Self {
        Criterion::And {
            children: children.into_iter().collect(),
        }
    }

    pub fn or(children: impl IntoIterator<Item = Criterion>) -> Self {
        Criterion::Or {
            children: children.into_iter().collect(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Criterion) -> Self {
        Criterion::Not {
            child: Box::new(child),
        }
    }

    pub fn string_match(
        field: impl Into<String>,
        value: impl Into<String>,
        match_type: MatchType,
    ) -> Self {
        Criterion::StringMatch {
            field: field.into(),
            value: value.into(),
            match_type,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::string_match(field, value, MatchType::Equals)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::string_match(field, value, MatchType::StartsWith)
    }

    pub fn ends_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::string_match(field, value, MatchType::EndsWith)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::string_match(field, value, MatchType::Contains)
    }

    pub fn any_of<S: Into<String>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Criterion::StringMatchAny {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn int_eq(field: impl Into<String>, value: i64) -> Self {
        Criterion::IntMatch {
            field: field.into(),
            value,
        }
    }

    pub fn range(field: impl Into<String>, comparisons: Vec<ValueComparison<Number>>) -> Self {
        Criterion::Range {
            field: field.into(),
            comparisons,
        }
    }

    pub fn date_range(
        field: impl Into<String>,
        comparisons: Vec<ValueComparison<DateTime<Utc>>>,
    ) -> Self {
        Criterion::DateRange {
            field: field.into(),
            comparisons,
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::range(
            field,
            vec![ValueComparison::new(ComparisonOperator::Gt, value.into())],
        )
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::range(
            field,
            vec![ValueComparison::new(ComparisonOperator::Gte, value.into())],
        )
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::range(
            field,
            vec![ValueComparison::new(ComparisonOperator::Lt, value.into())],
        )
    }

    pub fn le(field: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::range(
            field,
            vec![ValueComparison::new(ComparisonOperator::Lte, value.into())],
        )
    }

    /// Closed or half-open numeric interval
    pub fn between(
        field: impl Into<String>,
        lower: impl Into<Number>,
        lower_inclusive: bool,
        upper: impl Into<Number>,
        upper_inclusive: bool,
    ) -> Self {
        Self::range(
            field,
            vec![
                ValueComparison::new(ComparisonOperator::lower(lower_inclusive), lower.into()),
                ValueComparison::new(ComparisonOperator::upper(upper_inclusive), upper.into()),
            ],
        )
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Criterion::And { .. } | Criterion::Or { .. } | Criterion::Not { .. }
        )
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Criterion::And { children } | Criterion::Or { children } => {
                children.iter().map(Criterion::leaf_count).sum()
            }
            Criterion::Not { child } => child.leaf_count(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_operators_follow_inclusivity() {
        let crit = Criterion::between("altitude", 1i64, true, 10i64, false);
        match crit {
            Criterion::Range { comparisons, .. } => {
                assert_eq!(comparisons[0].operator, ComparisonOperator::Gte);
                assert_eq!(comparisons[1].operator, ComparisonOperator::Lt);
            }
            other => panic!("Expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_leaf_count() {
        let crit = Criterion::and([
            Criterion::int_eq("a", 1),
            Criterion::or([Criterion::int_eq("b", 2), Criterion::not(Criterion::eq("c", "x"))]),
        ]);
        assert_eq!(crit.leaf_count(), 3);
        assert!(!crit.is_leaf());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(-3).to_string(), "-3");
        assert_eq!(Number::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_criterion_serializes_with_kind_tag() {
        let json = serde_json::to_value(Criterion::starts_with("title", "mar")).unwrap();
        assert_eq!(json["kind"], "string_match");
        assert_eq!(json["match_type"], "STARTS_WITH");
    }
}
