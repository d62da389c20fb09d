//! Error types for the query pipeline.
//!
//! Each stage has its own error type so callers can tell malformed text
//! apart from a well-formed query that names an unknown or mistyped field.

use crate::metadata::FieldType;
use thiserror::Error;

/// Malformed query text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    /// Byte offset into the query text where the error was detected
    pub position: usize,
    /// Human-readable description
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Errors raised while turning a syntax tree into criteria.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("unknown field '{field}'")]
    FieldNotFound { field: String },

    #[error("cannot parse '{literal}' as {expected_type} for field '{field}'")]
    ValueParse {
        field: String,
        literal: String,
        expected_type: FieldType,
    },

    #[error("wildcard in the middle of '{pattern}' is not supported (field '{field}')")]
    MiddleWildcard { field: String, pattern: String },

    #[error("unsupported operation: {kind}")]
    UnsupportedOperation { kind: String },

    #[error("metadata for field '{field}' is unavailable: {reason}")]
    MetadataUnavailable { field: String, reason: String },

    #[error("{operation} is not supported on {field_type} field '{field}'")]
    UnsupportedFieldType {
        field: String,
        field_type: FieldType,
        operation: &'static str,
    },

    #[error("range on field '{field}' has no bounds")]
    EmptyRange { field: String },
}

impl TranslationError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedOperation { kind: kind.into() }
    }
}

/// Top-level error returned by [`crate::QueryCompiler`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("query is {length} bytes long, limit is {max}")]
    QueryTooLong { length: usize, max: usize },

    #[error("query has {count} clauses, limit is {max}")]
    TooManyClauses { count: usize, max: usize },
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for the whole pipeline
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for translation
pub type TranslationResult<T> = Result<T, TranslationError>;
