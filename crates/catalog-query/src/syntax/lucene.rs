//! Lucene-style field query grammar using chumsky.
//!
//! ```text
//! query      := clause+                       juxtaposition, loosest
//! clause     := conj ("OR" conj)*
//! conj       := modified ("AND" modified)*
//! modified   := ("+" | "-")? "NOT"* primary
//! primary    := "(" query ")" | field ":" value
//! value      := range | phrase | term ("~" similarity?)?
//! range      := ("[" | "{") bound "TO" bound ("]" | "}")
//! ```
//!
//! Keywords are case-sensitive. Every term must be field-qualified.

use crate::error::SyntaxError;
use crate::syntax::common::{
    bare_bound, bare_value, field_name, kw, quoted_phrase, to_syntax_error, Extra,
};
use crate::syntax::{ModifierKind, SyntaxNode};
use chumsky::prelude::*;
use tracing::trace;

/// Range bound written as `*`
const OPEN_BOUND: &str = "*";

/// Parse query text into a syntax tree.
pub fn parse(input: &str) -> Result<SyntaxNode, SyntaxError> {
    if input.trim().is_empty() {
        return Err(SyntaxError::new(0, "empty query"));
    }

    let node = query_parser()
        .parse(input)
        .into_result()
        .map_err(|errs| to_syntax_error(&errs, input))?;

    trace!(clauses = node.clause_count(), "parsed query");
    Ok(node)
}

// ============================================================================
// Intermediate types
// ============================================================================

/// Right-hand side of `field:` before it becomes a node
#[derive(Debug, Clone)]
enum FieldValue {
    Phrase(String),
    Term {
        text: String,
        fuzzy: Option<Option<String>>,
    },
    Range {
        lower: Option<String>,
        upper: Option<String>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    },
}

impl FieldValue {
    fn into_node(self, field: String) -> SyntaxNode {
        match self {
            FieldValue::Phrase(value) => SyntaxNode::Field { field, value },
            FieldValue::Term {
                text,
                fuzzy: Some(similarity),
            } => SyntaxNode::Fuzzy {
                field,
                term: text,
                similarity,
            },
            FieldValue::Term { text, fuzzy: None } if text.contains('*') => SyntaxNode::Wildcard {
                field,
                pattern: text,
            },
            FieldValue::Term { text, fuzzy: None } => SyntaxNode::Field { field, value: text },
            FieldValue::Range {
                lower,
                upper,
                lower_inclusive,
                upper_inclusive,
            } => SyntaxNode::TermRange {
                field,
                lower,
                upper,
                lower_inclusive,
                upper_inclusive,
            },
        }
    }
}

// ============================================================================
// Main parser
// ============================================================================

fn query_parser<'src>() -> impl Parser<'src, &'src str, SyntaxNode, Extra<'src>> {
    clause_list_parser().padded().then_ignore(end())
}

fn clause_list_parser<'src>() -> impl Parser<'src, &'src str, SyntaxNode, Extra<'src>> + Clone {
    recursive(|clause_list| {
        let group = clause_list
            .delimited_by(just('(').padded(), just(')').padded())
            .map(|inner| SyntaxNode::Group(Box::new(inner)))
            .labelled("parenthesised group");

        let primary = choice((group, field_clause_parser())).padded();

        let negated = kw("NOT")
            .padded()
            .repeated()
            .collect::<Vec<_>>()
            .then(primary)
            .map(|(nots, node)| {
                nots.into_iter()
                    .fold(node, |acc, _| SyntaxNode::Not(Box::new(acc)))
            });

        let modified = modifier_parser()
            .or_not()
            .then(negated)
            .map(|(modifier, node)| match modifier {
                Some(kind) => SyntaxNode::Modifier {
                    kind,
                    child: Box::new(node),
                },
                None => node,
            });

        let conjunction = modified
            .clone()
            .then(
                kw("AND")
                    .padded()
                    .ignore_then(modified)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| n_ary(first, rest, SyntaxNode::And));

        let disjunction = conjunction
            .clone()
            .then(
                kw("OR")
                    .padded()
                    .ignore_then(conjunction)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| n_ary(first, rest, SyntaxNode::Or));

        disjunction
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .map(clause_list_node)
    })
}

fn modifier_parser<'src>() -> impl Parser<'src, &'src str, ModifierKind, Extra<'src>> + Clone {
    choice((
        just('+').to(ModifierKind::Required),
        just('-').to(ModifierKind::Prohibited),
    ))
    .labelled("modifier like + or -")
}

// ============================================================================
// Field clauses
// ============================================================================

fn field_clause_parser<'src>() -> impl Parser<'src, &'src str, SyntaxNode, Extra<'src>> + Clone {
    field_name()
        .then_ignore(just(':'))
        .then(choice((
            range_parser(),
            quoted_phrase().map(FieldValue::Phrase),
            term_parser(),
        )))
        .map(|(field, value)| value.into_node(field))
        .labelled("field clause like title:value")
}

/// Unquoted term, optionally followed by a fuzzy marker
fn term_parser<'src>() -> impl Parser<'src, &'src str, FieldValue, Extra<'src>> + Clone {
    let similarity = any()
        .filter(|c: &char| c.is_ascii_digit() || *c == '.')
        .repeated()
        .to_slice()
        .map(|s: &str| (!s.is_empty()).then(|| s.to_string()));

    bare_value()
        .then(just('~').ignore_then(similarity).or_not())
        .map(|(text, fuzzy)| FieldValue::Term {
            text: text.to_string(),
            fuzzy,
        })
}

/// `[lower TO upper]`, `{lower TO upper}` or any mix of the two
fn range_parser<'src>() -> impl Parser<'src, &'src str, FieldValue, Extra<'src>> + Clone {
    let bound = choice((
        quoted_phrase().map(Some),
        bare_bound().map(|s: &str| (s != OPEN_BOUND).then(|| s.to_string())),
    ))
    .padded();

    let open = choice((just('[').to(true), just('{').to(false)));
    let close = choice((just(']').to(true), just('}').to(false)));

    open.then(bound.clone())
        .then_ignore(kw("TO"))
        .then(bound)
        .then(close)
        .map(
            |(((lower_inclusive, lower), upper), upper_inclusive)| FieldValue::Range {
                lower,
                upper,
                lower_inclusive,
                upper_inclusive,
            },
        )
        .labelled("range like [1 TO 10]")
}

// ============================================================================
// Node construction
// ============================================================================

fn n_ary(
    first: SyntaxNode,
    rest: Vec<SyntaxNode>,
    build: fn(Vec<SyntaxNode>) -> SyntaxNode,
) -> SyntaxNode {
    if rest.is_empty() {
        return first;
    }
    let mut children = Vec::with_capacity(rest.len() + 1);
    children.push(first);
    children.extend(rest);
    build(children)
}

/// A single clause stands alone; several become a `Boolean` of modifiers
fn clause_list_node(mut clauses: Vec<SyntaxNode>) -> SyntaxNode {
    if clauses.len() == 1 {
        return clauses.remove(0);
    }
    SyntaxNode::Boolean(
        clauses
            .into_iter()
            .map(|clause| match clause {
                modified @ SyntaxNode::Modifier { .. } => modified,
                other => SyntaxNode::Modifier {
                    kind: ModifierKind::None,
                    child: Box::new(other),
                },
            })
            .collect(),
    )
}
