//! Shared fixtures for unit tests.

use crate::metadata::{FieldType, StaticMetadata};

/// Catalog covering every field type
pub fn sample_catalog() -> StaticMetadata {
    StaticMetadata::builder()
        .field("title", FieldType::String)
        .field("val", FieldType::String)
        .field("properties.mission", FieldType::String)
        .multi_valued("tags", FieldType::String)
        .field("altitude", FieldType::Integer)
        .field("a", FieldType::Integer)
        .field("b", FieldType::Integer)
        .field("c", FieldType::Integer)
        .field("count", FieldType::Long)
        .field("bpm", FieldType::Double)
        .field("date", FieldType::Datetime)
        .build()
        .expect("sample catalog field names are valid")
}
