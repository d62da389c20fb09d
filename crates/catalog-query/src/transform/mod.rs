//! Syntax tree to criterion translation.
//!
//! One handler per [`SyntaxNode`] kind, selected by an exhaustive match.
//! Field clauses are resolved against a [`MetadataResolver`] and their
//! values parsed according to the declared field type. Any failing child
//! fails its parent; no partial criterion is ever returned.

mod boolean;
mod field;
mod literal;
mod range;
mod wildcard;

pub use literal::{parse_datetime, parse_double, parse_integer};

use crate::error::{TranslationError, TranslationResult};
use crate::ir::Criterion;
use crate::metadata::{FieldDescriptor, MetadataError, MetadataResolver};
use crate::syntax::SyntaxNode;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Translate a syntax tree into a criterion.
pub fn translate(node: &SyntaxNode, resolver: &dyn MetadataResolver) -> TranslationResult<Criterion> {
    Translator::new(resolver).translate(node)
}

/// Walks one syntax tree, remembering each field it has already resolved.
pub struct Translator<'r> {
    resolver: &'r dyn MetadataResolver,
    descriptors: HashMap<String, FieldDescriptor>,
}

impl<'r> Translator<'r> {
    pub fn new(resolver: &'r dyn MetadataResolver) -> Self {
        Self {
            resolver,
            descriptors: HashMap::new(),
        }
    }

    pub fn translate(&mut self, node: &SyntaxNode) -> TranslationResult<Criterion> {
        match node {
            SyntaxNode::And(children) => boolean::and(self, children),
            SyntaxNode::Or(children) => boolean::or(self, children),
            SyntaxNode::Not(child) => boolean::not(self, child),
            SyntaxNode::Group(inner) => self.translate(inner),
            SyntaxNode::Modifier { kind, child } => boolean::modifier(self, *kind, child),
            SyntaxNode::Boolean(clauses) => boolean::clause_list(self, clauses),
            SyntaxNode::Field { field, value } => field::field_term(self, field, value),
            SyntaxNode::TermRange {
                field,
                lower,
                upper,
                lower_inclusive,
                upper_inclusive,
            } => range::term_range(
                self,
                field,
                range::Bounds {
                    lower: lower.as_deref(),
                    upper: upper.as_deref(),
                    lower_inclusive: *lower_inclusive,
                    upper_inclusive: *upper_inclusive,
                },
            ),
            SyntaxNode::Wildcard { field, pattern } => wildcard::wildcard(self, field, pattern),
            SyntaxNode::Fuzzy { .. } => Err(TranslationError::unsupported(node.kind().as_str())),
        }
    }

    /// Resolve a field once per translation
    fn descriptor(&mut self, field: &str) -> TranslationResult<FieldDescriptor> {
        if let Some(descriptor) = self.descriptors.get(field) {
            return Ok(descriptor.clone());
        }

        let descriptor = self.resolver.resolve(field).map_err(|err| match err {
            MetadataError::NotFound { field } | MetadataError::InvalidName { field } => {
                debug!(field = %field, "unknown field in query");
                TranslationError::FieldNotFound { field }
            }
            MetadataError::Unavailable { field, reason } => {
                warn!(field = %field, reason = %reason, "metadata catalog unavailable");
                TranslationError::MetadataUnavailable { field, reason }
            }
        })?;

        self.descriptors
            .insert(field.to_string(), descriptor.clone());
        Ok(descriptor)
    }
}
