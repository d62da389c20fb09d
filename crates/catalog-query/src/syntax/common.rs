//! Shared parser primitives for the query grammar.

use crate::error::SyntaxError;
use chumsky::extra;
use chumsky::prelude::*;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Characters that end an unquoted value
const VALUE_DELIMITERS: &str = "()[]{}\"'~";

/// Characters that end a range bound
const BOUND_DELIMITERS: &str = "[]{}\"";

// ============================================================================
// Primitive parsers
// ============================================================================

/// Parser for field names: alphanumeric, underscore and dots (`properties.title`)
pub fn field_name<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
        .labelled("field name")
}

/// Parser for double-quoted phrases with `\"` and `\\` escapes
pub fn quoted_phrase<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let escaped = just('\\').ignore_then(any());
    let plain = none_of("\\\"");

    just('"')
        .ignore_then(escaped.or(plain).repeated().collect::<String>())
        .then_ignore(just('"'))
        .labelled("quoted phrase")
}

/// Parser for an unquoted value token; may contain `:` and `*`
pub fn bare_value<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| !c.is_whitespace() && !VALUE_DELIMITERS.contains(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .labelled("value")
}

/// Parser for an unquoted range bound
pub fn bare_bound<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| !c.is_whitespace() && !BOUND_DELIMITERS.contains(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .labelled("range bound")
}

/// Case-sensitive keyword matcher.
///
/// Consumes a whole word of field-name characters so `ANDROID:x` or `NOT1:x`
/// are read as fields, not as a keyword followed by garbage.
pub fn kw<'src>(keyword: &'static str) -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(move |s: &str, span| {
            if s == keyword {
                Ok(())
            } else {
                Err(Rich::custom(
                    span,
                    format!("expected keyword '{}'", keyword),
                ))
            }
        })
}

// ============================================================================
// Error formatting
// ============================================================================

/// Format chumsky errors for human consumption
pub fn format_errors(errs: &[Rich<'_, char>], input: &str) -> String {
    errs.iter()
        .map(|e| {
            let start = e.span().start;
            let col = input[..start].chars().count();

            let found = e
                .found()
                .map_or("end of input".to_string(), |c| format!("'{}'", c));

            format!("column {}: {} (found {})", col + 1, e.reason(), found)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse chumsky errors into a single positioned [`SyntaxError`]
pub fn to_syntax_error(errs: &[Rich<'_, char>], input: &str) -> SyntaxError {
    let position = errs.first().map_or(input.len(), |e| e.span().start);
    SyntaxError::new(position, format_errors(errs, input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_dotted() {
        let result = field_name().parse("properties.title").into_result();
        assert_eq!(result.unwrap(), "properties.title");
    }

    #[test]
    fn test_field_name_rejects_empty() {
        assert!(field_name().parse("").into_result().is_err());
    }

    #[test]
    fn test_quoted_phrase_with_spaces() {
        let result = quoted_phrase().parse("\"harry potter\"").into_result();
        assert_eq!(result.unwrap(), "harry potter");
    }

    #[test]
    fn test_quoted_phrase_escapes() {
        let result = quoted_phrase()
            .parse(r#""URN\:PROJECT \"x\" \\ y""#)
            .into_result();
        assert_eq!(result.unwrap(), r#"URN:PROJECT "x" \ y"#);
    }

    #[test]
    fn test_quoted_phrase_unterminated() {
        assert!(quoted_phrase().parse("\"open").into_result().is_err());
    }

    #[test]
    fn test_bare_value_keeps_colons_and_stars() {
        let result = bare_value().parse("2020-01-01T00:00:00Z").into_result();
        assert_eq!(result.unwrap(), "2020-01-01T00:00:00Z");

        let result = bare_value().parse("*mars*").into_result();
        assert_eq!(result.unwrap(), "*mars*");
    }

    #[test]
    fn test_bare_value_stops_at_apostrophe() {
        assert!(bare_value().parse("it's").into_result().is_err());

        let result = bare_value()
            .then_ignore(just('\'').then(any().repeated()))
            .parse("it's")
            .into_result();
        assert_eq!(result.unwrap(), "it");
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        assert!(kw("AND").parse("AND").into_result().is_ok());
        assert!(kw("AND").parse("and").into_result().is_err());
        assert!(kw("AND").parse("ANDROID").into_result().is_err());
    }

    #[test]
    fn test_to_syntax_error_position() {
        let errs = field_name()
            .then_ignore(just(':'))
            .parse("title=")
            .into_errors();
        let err = to_syntax_error(&errs, "title=");
        assert_eq!(err.position, 5);
        assert!(err.message.contains("column 6"));
    }
}
