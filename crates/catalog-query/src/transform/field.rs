//! `field:value` clauses.

use super::literal::{parse_datetime, parse_double, parse_integer};
use super::Translator;
use crate::error::{TranslationError, TranslationResult};
use crate::ir::{ComparisonOperator, Criterion, ValueComparison};
use crate::metadata::FieldType;

pub(super) fn field_term(
    t: &mut Translator<'_>,
    field: &str,
    value: &str,
) -> TranslationResult<Criterion> {
    let descriptor = t.descriptor(field)?;

    match descriptor.field_type {
        FieldType::String if descriptor.multi_valued => {
            let values: Vec<&str> = value.split_whitespace().collect();
            if values.is_empty() {
                return Err(TranslationError::ValueParse {
                    field: field.to_string(),
                    literal: value.to_string(),
                    expected_type: FieldType::String,
                });
            }
            Ok(Criterion::any_of(field, values))
        }
        FieldType::String => Ok(Criterion::eq(field, value)),
        FieldType::Integer | FieldType::Long => Ok(Criterion::int_eq(
            field,
            parse_integer(field, value, descriptor.field_type)?,
        )),
        // Exact match on a non-integral value is a degenerate closed interval
        FieldType::Double => {
            let x = parse_double(field, value)?;
            Ok(Criterion::between(field, x, true, x, true))
        }
        FieldType::Datetime => {
            let dt = parse_datetime(field, value)?;
            Ok(Criterion::date_range(
                field,
                vec![
                    ValueComparison::new(ComparisonOperator::Gte, dt),
                    ValueComparison::new(ComparisonOperator::Lte, dt),
                ],
            ))
        }
    }
}
