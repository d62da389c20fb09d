//! Attribute metadata lookup.
//!
//! The translators only need to know, for each field name in a query, what
//! type of values the field holds and whether it is multi-valued. Where that
//! knowledge comes from (a remote catalog, a static map) is hidden behind
//! [`MetadataResolver`].

mod cache;

pub use cache::CachingResolver;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Dotted attribute paths like `properties.title` or `tags`
static FIELD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*$").unwrap());

/// Declared type of a catalog attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    String,
    Integer,
    Long,
    Double,
    Datetime,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Integer => "INTEGER",
            FieldType::Long => "LONG",
            FieldType::Double => "DOUBLE",
            FieldType::Datetime => "DATETIME",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the catalog knows about one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub multi_valued: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            multi_valued: false,
        }
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }
}

/// Lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("field '{field}' not found")]
    NotFound { field: String },

    /// The backing catalog could not be reached
    #[error("metadata for '{field}' unavailable: {reason}")]
    Unavailable { field: String, reason: String },

    #[error("'{field}' is not a valid field name")]
    InvalidName { field: String },
}

/// Resolves field names to descriptors.
///
/// Implementations must be cheap to call concurrently. A lookup that has to
/// go remote should bound its own latency and report a timeout as
/// [`MetadataError::Unavailable`].
pub trait MetadataResolver: Send + Sync {
    fn resolve(&self, field: &str) -> Result<FieldDescriptor, MetadataError>;
}

impl<R: MetadataResolver + ?Sized> MetadataResolver for Arc<R> {
    fn resolve(&self, field: &str) -> Result<FieldDescriptor, MetadataError> {
        (**self).resolve(field)
    }
}

impl<R: MetadataResolver + ?Sized> MetadataResolver for &R {
    fn resolve(&self, field: &str) -> Result<FieldDescriptor, MetadataError> {
        (**self).resolve(field)
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    fields: HashMap<String, FieldDescriptor>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> StaticMetadataBuilder {
        StaticMetadataBuilder::default()
    }

    /// Load a catalog from a JSON array of descriptors.
    ///
    /// ```json
    /// [{"name": "title", "type": "STRING"}, {"name": "tags", "type": "STRING", "multi_valued": true}]
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let descriptors: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Ok(Self::from_descriptors(descriptors))
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let fields = descriptors
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, descriptor: FieldDescriptor) {
        self.fields.insert(descriptor.name.clone(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl MetadataResolver for StaticMetadata {
    fn resolve(&self, field: &str) -> Result<FieldDescriptor, MetadataError> {
        self.fields
            .get(field)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound {
                field: field.to_string(),
            })
    }
}

/// Builder for ergonomic catalog construction
#[derive(Debug, Default)]
pub struct StaticMetadataBuilder {
    fields: Vec<FieldDescriptor>,
}

impl StaticMetadataBuilder {
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDescriptor::new(name, field_type));
        self
    }

    pub fn multi_valued(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, field_type).multi_valued());
        self
    }

    /// Build the catalog, rejecting names the query grammar could never reference.
    pub fn build(self) -> Result<StaticMetadata, MetadataError> {
        if let Some(bad) = self.fields.iter().find(|d| !is_valid_field_name(&d.name)) {
            return Err(MetadataError::InvalidName {
                field: bad.name.clone(),
            });
        }
        Ok(StaticMetadata::from_descriptors(self.fields))
    }
}

/// Whether `name` can appear as a field in query text.
pub fn is_valid_field_name(name: &str) -> bool {
    FIELD_NAME_RE.is_match(name)
}
