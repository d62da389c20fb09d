//! `field:[lower TO upper]` clauses.

use super::literal::{parse_datetime, parse_double, parse_integer};
use super::Translator;
use crate::error::{TranslationError, TranslationResult};
use crate::ir::{ComparisonOperator, Criterion, Number, ValueComparison};
use crate::metadata::FieldType;

/// Range bounds as written; `None` is an open bound
#[derive(Debug, Clone, Copy)]
pub(super) struct Bounds<'a> {
    pub lower: Option<&'a str>,
    pub upper: Option<&'a str>,
    pub lower_inclusive: bool,
    pub upper_inclusive: bool,
}

impl Bounds<'_> {
    /// Lower bound maps to GT/GTE, upper to LT/LTE; open bounds are skipped
    fn comparisons<T>(
        &self,
        mut parse: impl FnMut(&str) -> TranslationResult<T>,
    ) -> TranslationResult<Vec<ValueComparison<T>>> {
        let mut comparisons = Vec::with_capacity(2);
        if let Some(lower) = self.lower {
            comparisons.push(ValueComparison::new(
                ComparisonOperator::lower(self.lower_inclusive),
                parse(lower)?,
            ));
        }
        if let Some(upper) = self.upper {
            comparisons.push(ValueComparison::new(
                ComparisonOperator::upper(self.upper_inclusive),
                parse(upper)?,
            ));
        }
        Ok(comparisons)
    }
}

pub(super) fn term_range(
    t: &mut Translator<'_>,
    field: &str,
    bounds: Bounds<'_>,
) -> TranslationResult<Criterion> {
    let descriptor = t.descriptor(field)?;
    let field_type = descriptor.field_type;

    if field_type != FieldType::String && bounds.lower.is_none() && bounds.upper.is_none() {
        return Err(TranslationError::EmptyRange {
            field: field.to_string(),
        });
    }

    match field_type {
        FieldType::String => Err(TranslationError::UnsupportedFieldType {
            field: field.to_string(),
            field_type,
            operation: "range query",
        }),
        FieldType::Integer | FieldType::Long => Ok(Criterion::range(
            field,
            bounds.comparisons(|s| parse_integer(field, s, field_type).map(Number::Int))?,
        )),
        FieldType::Double => Ok(Criterion::range(
            field,
            bounds.comparisons(|s| parse_double(field, s).map(Number::Float))?,
        )),
        FieldType::Datetime => Ok(Criterion::date_range(
            field,
            bounds.comparisons(|s| parse_datetime(field, s))?,
        )),
    }
}
