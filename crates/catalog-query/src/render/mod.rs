//! Target renderers for criteria.
//!
//! Renderers convert the backend-agnostic [`Criterion`] tree into the query
//! representation of a concrete search engine.

mod query;
mod search;

pub use query::{BackendQuery, BoolQuery, FieldClause, MatchValue, RangeBounds, RangeValue};
pub use search::SearchRenderer;

use crate::ir::Criterion;

/// Trait for rendering criteria to a backend query.
///
/// Rendering is total: every well-formed criterion has a rendering, and all
/// validation already happened during translation.
pub trait QueryRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Render the criterion tree
    fn render(&self, criterion: &Criterion) -> BackendQuery;
}
