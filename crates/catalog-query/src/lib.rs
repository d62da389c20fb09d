//! # Catalog Query
//!
//! Compiles field-qualified boolean queries into search-engine queries.
//!
//! ## Pipeline
//!
//! ```text
//! query text → syntax::parse → SyntaxNode
//!            → transform::translate (+ MetadataResolver) → Criterion
//!            → QueryRenderer::render → BackendQuery
//! ```
//!
//! Parsing knows nothing about field types. Translation resolves every field
//! against a metadata catalog and parses literals by the declared type, so
//! all validation is done before rendering starts.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_query::{FieldType, QueryCompiler, StaticMetadata};
//! use serde_json::json;
//!
//! let catalog = StaticMetadata::builder()
//!     .field("title", FieldType::String)
//!     .field("altitude", FieldType::Integer)
//!     .build()?;
//!
//! let compiler = QueryCompiler::new(catalog);
//! let query = compiler.compile("title:mars* AND altitude:[1000 TO *]")?;
//!
//! assert_eq!(
//!     query.to_json()?,
//!     json!({"bool": {"must": [
//!         {"match_phrase_prefix": {"title": "mars"}},
//!         {"range": {"altitude": {"gte": 1000}}}
//!     ]}})
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::all)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod ir;
pub mod metadata;
pub mod render;
pub mod syntax;
pub mod transform;

#[cfg(test)]
mod test_utils;

pub use compiler::QueryCompiler;
pub use config::{CompilerConfig, MetadataCacheConfig, QueryLimits};
pub use error::{ConfigError, QueryError, QueryResult, SyntaxError, TranslationError};
pub use ir::{ComparisonOperator, Criterion, MatchType, Number, ValueComparison};
pub use metadata::{
    CachingResolver, FieldDescriptor, FieldType, MetadataError, MetadataResolver, StaticMetadata,
};
pub use render::{BackendQuery, QueryRenderer, SearchRenderer};
pub use syntax::{parse, ModifierKind, SyntaxNode, SyntaxNodeKind};
pub use transform::translate;
