//! `field:pat*tern` clauses.

use super::Translator;
use crate::error::{TranslationError, TranslationResult};
use crate::ir::{Criterion, MatchType};
use crate::metadata::FieldType;

const WILDCARD: char = '*';

pub(super) fn wildcard(
    t: &mut Translator<'_>,
    field: &str,
    pattern: &str,
) -> TranslationResult<Criterion> {
    let descriptor = t.descriptor(field)?;
    if descriptor.field_type != FieldType::String {
        return Err(TranslationError::UnsupportedFieldType {
            field: field.to_string(),
            field_type: descriptor.field_type,
            operation: "wildcard query",
        });
    }

    let (value, match_type) = classify(field, pattern)?;
    Ok(Criterion::string_match(field, value, match_type))
}

/// Split a pattern into its literal part and how it must match
fn classify<'p>(field: &str, pattern: &'p str) -> TranslationResult<(&'p str, MatchType)> {
    let leading = pattern.starts_with(WILDCARD);
    let trailing = pattern.ends_with(WILDCARD);
    let value = pattern.trim_matches(WILDCARD);

    if value.is_empty() {
        return Err(TranslationError::unsupported("match-all wildcard"));
    }
    if value.contains(WILDCARD) {
        return Err(TranslationError::MiddleWildcard {
            field: field.to_string(),
            pattern: pattern.to_string(),
        });
    }

    let match_type = match (leading, trailing) {
        (true, true) => MatchType::Contains,
        (false, true) => MatchType::StartsWith,
        (true, false) => MatchType::EndsWith,
        (false, false) => MatchType::Equals,
    };
    Ok((value, match_type))
}
