//! Typed literal parsing for field values and range bounds.

use crate::error::{TranslationError, TranslationResult};
use crate::metadata::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

fn value_error(field: &str, literal: &str, expected_type: FieldType) -> TranslationError {
    TranslationError::ValueParse {
        field: field.to_string(),
        literal: literal.to_string(),
        expected_type,
    }
}

/// Parse an integer literal, honouring the 32-bit width of INTEGER fields
pub fn parse_integer(field: &str, literal: &str, field_type: FieldType) -> TranslationResult<i64> {
    let parsed = match field_type {
        FieldType::Integer => literal.parse::<i32>().map(i64::from).ok(),
        _ => literal.parse::<i64>().ok(),
    };
    parsed.ok_or_else(|| value_error(field, literal, field_type))
}

/// Parse a finite floating-point literal
pub fn parse_double(field: &str, literal: &str) -> TranslationResult<f64> {
    literal
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or_else(|| value_error(field, literal, FieldType::Double))
}

/// Parse an ISO-8601 date-time and normalize it to UTC.
///
/// Accepts RFC 3339 with any offset, an offset-less date-time (taken as
/// UTC) and a bare date (midnight UTC).
pub fn parse_datetime(field: &str, literal: &str) -> TranslationResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(literal) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(literal, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(value_error(field, literal, FieldType::Datetime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case("42", 42 ; "positive")]
    #[test_case("-8848", -8848 ; "negative")]
    #[test_case("+7", 7 ; "explicit sign")]
    fn test_parse_integer(literal: &str, expected: i64) {
        assert_eq!(
            parse_integer("altitude", literal, FieldType::Integer).unwrap(),
            expected
        );
    }

    #[test]
    fn test_integer_width_depends_on_type() {
        let big = "3000000000";
        assert!(parse_integer("altitude", big, FieldType::Integer).is_err());
        assert_eq!(
            parse_integer("count", big, FieldType::Long).unwrap(),
            3_000_000_000
        );
    }

    #[test]
    fn test_parse_integer_error_carries_context() {
        let err = parse_integer("altitude", "high", FieldType::Integer).unwrap_err();
        assert_eq!(
            err,
            TranslationError::ValueParse {
                field: "altitude".to_string(),
                literal: "high".to_string(),
                expected_type: FieldType::Integer,
            }
        );
    }

    #[test_case("145.6", 145.6 ; "decimal")]
    #[test_case("-1e3", -1000.0 ; "exponent")]
    #[test_case("12", 12.0 ; "integral")]
    fn test_parse_double(literal: &str, expected: f64) {
        assert_eq!(parse_double("bpm", literal).unwrap(), expected);
    }

    #[test_case("NaN" ; "nan")]
    #[test_case("inf" ; "infinity")]
    #[test_case("fast" ; "word")]
    fn test_parse_double_rejects(literal: &str) {
        assert!(parse_double("bpm", literal).is_err());
    }

    #[test]
    fn test_parse_datetime_utc() {
        let dt = parse_datetime("date", "2020-01-01T00:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_offset_is_normalized() {
        let dt = parse_datetime("date", "2020-01-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_without_offset() {
        let dt = parse_datetime("date", "2020-06-15T12:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 6, 15, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_datetime("date", "2020-06-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("date", "yesterday").unwrap_err();
        assert!(matches!(
            err,
            TranslationError::ValueParse {
                expected_type: FieldType::Datetime,
                ..
            }
        ));
    }
}
