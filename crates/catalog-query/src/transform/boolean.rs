//! Composite nodes: AND, OR, NOT, prefixed clauses and clause lists.

use super::Translator;
use crate::error::TranslationResult;
use crate::ir::Criterion;
use crate::syntax::{ModifierKind, SyntaxNode};

pub(super) fn and(t: &mut Translator<'_>, children: &[SyntaxNode]) -> TranslationResult<Criterion> {
    Ok(Criterion::and(translate_all(t, children)?))
}

pub(super) fn or(t: &mut Translator<'_>, children: &[SyntaxNode]) -> TranslationResult<Criterion> {
    Ok(Criterion::or(translate_all(t, children)?))
}

pub(super) fn not(t: &mut Translator<'_>, child: &SyntaxNode) -> TranslationResult<Criterion> {
    Ok(Criterion::not(t.translate(child)?))
}

/// A prefixed clause outside a clause list
pub(super) fn modifier(
    t: &mut Translator<'_>,
    kind: ModifierKind,
    child: &SyntaxNode,
) -> TranslationResult<Criterion> {
    let criterion = t.translate(child)?;
    Ok(match kind {
        ModifierKind::Prohibited => Criterion::not(criterion),
        ModifierKind::Required | ModifierKind::None => criterion,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occur {
    Must,
    MustNot,
    Should,
}

/// Juxtaposed clauses like `+a -b c`.
///
/// Without any `+`, `-` or `NOT` clause this is an OR of every clause.
/// Otherwise it is an AND of the required clauses and the negated
/// prohibited ones, in source order. Unprefixed clauses are then only
/// kept when nothing is required, as one leading must-clause.
pub(super) fn clause_list(
    t: &mut Translator<'_>,
    clauses: &[SyntaxNode],
) -> TranslationResult<Criterion> {
    let mut must = Vec::new();
    let mut should = Vec::new();
    let mut required = false;

    for clause in clauses {
        let (occur, inner) = occurrence(clause);
        let criterion = t.translate(inner)?;
        match occur {
            Occur::Must => {
                required = true;
                must.push(criterion);
            }
            Occur::MustNot => must.push(Criterion::not(criterion)),
            Occur::Should => should.push(criterion),
        }
    }

    if must.is_empty() {
        return Ok(Criterion::or(should));
    }

    if !required && !should.is_empty() {
        let optional = if should.len() == 1 {
            should.remove(0)
        } else {
            Criterion::or(should)
        };
        must.insert(0, optional);
    }

    Ok(Criterion::and(must))
}

fn occurrence(clause: &SyntaxNode) -> (Occur, &SyntaxNode) {
    match clause {
        SyntaxNode::Modifier {
            kind: ModifierKind::Required,
            child,
        } => (Occur::Must, child.as_ref()),
        SyntaxNode::Modifier {
            kind: ModifierKind::Prohibited,
            child,
        } => (Occur::MustNot, child.as_ref()),
        SyntaxNode::Modifier {
            kind: ModifierKind::None,
            child,
        } => match child.as_ref() {
            SyntaxNode::Not(inner) => (Occur::MustNot, inner.as_ref()),
            plain => (Occur::Should, plain),
        },
        SyntaxNode::Not(inner) => (Occur::MustNot, inner.as_ref()),
        other => (Occur::Should, other),
    }
}

fn translate_all(
    t: &mut Translator<'_>,
    children: &[SyntaxNode],
) -> TranslationResult<Vec<Criterion>> {
    children.iter().map(|child| t.translate(child)).collect()
}

#[cfg(test)]
mod tests {
    use crate::error::TranslationError;
    use crate::ir::Criterion;
    use crate::syntax::parse;
    use crate::test_utils::sample_catalog;
    use crate::transform::translate;

    fn translate_text(text: &str) -> Result<Criterion, TranslationError> {
        translate(&parse(text).unwrap(), &sample_catalog())
    }

    #[test]
    fn test_and_with_nested_or() {
        assert_eq!(
            translate_text("a:1 AND (b:2 OR c:3)").unwrap(),
            Criterion::and([
                Criterion::int_eq("a", 1),
                Criterion::or([Criterion::int_eq("b", 2), Criterion::int_eq("c", 3)]),
            ])
        );
    }

    #[test]
    fn test_children_keep_source_order() {
        assert_eq!(
            translate_text("c:3 OR a:1 OR b:2").unwrap(),
            Criterion::or([
                Criterion::int_eq("c", 3),
                Criterion::int_eq("a", 1),
                Criterion::int_eq("b", 2),
            ])
        );
    }

    #[test]
    fn test_not() {
        assert_eq!(
            translate_text("NOT a:1").unwrap(),
            Criterion::not(Criterion::int_eq("a", 1))
        );
    }

    #[test]
    fn test_required_and_prohibited_drop_optional() {
        assert_eq!(
            translate_text("+a:1 -b:2 c:3").unwrap(),
            Criterion::and([
                Criterion::int_eq("a", 1),
                Criterion::not(Criterion::int_eq("b", 2)),
            ])
        );
    }

    #[test]
    fn test_plain_clause_list_is_or() {
        assert_eq!(
            translate_text("a:1 b:2 c:3").unwrap(),
            Criterion::or([
                Criterion::int_eq("a", 1),
                Criterion::int_eq("b", 2),
                Criterion::int_eq("c", 3),
            ])
        );
    }

    #[test]
    fn test_prohibited_only_keeps_optional_as_must() {
        assert_eq!(
            translate_text("a:1 NOT b:2").unwrap(),
            Criterion::and([
                Criterion::int_eq("a", 1),
                Criterion::not(Criterion::int_eq("b", 2)),
            ])
        );
        assert_eq!(
            translate_text("a:1 c:3 -b:2").unwrap(),
            Criterion::and([
                Criterion::or([Criterion::int_eq("a", 1), Criterion::int_eq("c", 3)]),
                Criterion::not(Criterion::int_eq("b", 2)),
            ])
        );
    }

    #[test]
    fn test_standalone_modifiers() {
        assert_eq!(
            translate_text("-a:1").unwrap(),
            Criterion::not(Criterion::int_eq("a", 1))
        );
        assert_eq!(translate_text("+a:1").unwrap(), Criterion::int_eq("a", 1));
    }

    #[test]
    fn test_failing_child_fails_parent() {
        let err = translate_text("a:1 OR nope:2").unwrap_err();
        assert_eq!(
            err,
            TranslationError::FieldNotFound {
                field: "nope".to_string()
            }
        );

        let err = translate_text("a:1 AND (b:2 OR val:fo*o)").unwrap_err();
        assert!(matches!(err, TranslationError::MiddleWildcard { .. }));
    }
}
