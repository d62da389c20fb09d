//! Query text parsing.
//!
//! Turns the field-qualified boolean mini-language into a [`SyntaxNode`]
//! tree. Nothing here knows about field types; `title:abc` and `altitude:abc`
//! parse the same way and only fail later, during translation.
//!
//! ```text
//! title:"mars rover" AND (altitude:[1000 TO *] OR -mission:apollo*)
//! ```

mod common;
mod lucene;

pub use lucene::parse;

use std::fmt;

/// Clause prefix: `+` (must), `-` (must not) or nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Required,
    Prohibited,
    None,
}

/// Parser output. Immutable once built; consumed once by the translators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// `a AND b AND c`
    And(Vec<SyntaxNode>),
    /// `a OR b OR c`
    Or(Vec<SyntaxNode>),
    /// `NOT a`
    Not(Box<SyntaxNode>),
    /// `( ... )`
    Group(Box<SyntaxNode>),
    /// A prefixed clause, or any clause inside a [`SyntaxNode::Boolean`] list
    Modifier {
        kind: ModifierKind,
        child: Box<SyntaxNode>,
    },
    /// Juxtaposed clauses `+a -b c`; every child is a `Modifier`
    Boolean(Vec<SyntaxNode>),
    /// `field:value` or `field:"quoted phrase"`
    Field { field: String, value: String },
    /// `field:[lower TO upper]`; `None` bounds were written as `*`
    TermRange {
        field: String,
        lower: Option<String>,
        upper: Option<String>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    },
    /// Unquoted value containing `*`
    Wildcard { field: String, pattern: String },
    /// `field:term~` or `field:term~0.8`
    Fuzzy {
        field: String,
        term: String,
        similarity: Option<String>,
    },
}

/// Field-less discriminant of [`SyntaxNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxNodeKind {
    And,
    Or,
    Not,
    Group,
    Modifier,
    Boolean,
    Field,
    TermRange,
    Wildcard,
    Fuzzy,
}

impl SyntaxNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxNodeKind::And => "and",
            SyntaxNodeKind::Or => "or",
            SyntaxNodeKind::Not => "not",
            SyntaxNodeKind::Group => "group",
            SyntaxNodeKind::Modifier => "modifier",
            SyntaxNodeKind::Boolean => "boolean",
            SyntaxNodeKind::Field => "field",
            SyntaxNodeKind::TermRange => "term range",
            SyntaxNodeKind::Wildcard => "wildcard",
            SyntaxNodeKind::Fuzzy => "fuzzy search",
        }
    }
}

impl fmt::Display for SyntaxNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxNodeKind {
        match self {
            SyntaxNode::And(_) => SyntaxNodeKind::And,
            SyntaxNode::Or(_) => SyntaxNodeKind::Or,
            SyntaxNode::Not(_) => SyntaxNodeKind::Not,
            SyntaxNode::Group(_) => SyntaxNodeKind::Group,
            SyntaxNode::Modifier { .. } => SyntaxNodeKind::Modifier,
            SyntaxNode::Boolean(_) => SyntaxNodeKind::Boolean,
            SyntaxNode::Field { .. } => SyntaxNodeKind::Field,
            SyntaxNode::TermRange { .. } => SyntaxNodeKind::TermRange,
            SyntaxNode::Wildcard { .. } => SyntaxNodeKind::Wildcard,
            SyntaxNode::Fuzzy { .. } => SyntaxNodeKind::Fuzzy,
        }
    }

    /// Number of field clauses in the tree
    pub fn clause_count(&self) -> usize {
        match self {
            SyntaxNode::And(children) | SyntaxNode::Or(children) | SyntaxNode::Boolean(children) => {
                children.iter().map(SyntaxNode::clause_count).sum()
            }
            SyntaxNode::Not(child)
            | SyntaxNode::Group(child)
            | SyntaxNode::Modifier { child, .. } => child.clause_count(),
            SyntaxNode::Field { .. }
            | SyntaxNode::TermRange { .. }
            | SyntaxNode::Wildcard { .. }
            | SyntaxNode::Fuzzy { .. } => 1,
        }
    }
}
