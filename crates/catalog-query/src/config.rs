//! Compiler configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! [limits]
//! max_query_length = 4096
//! max_clause_count = 256
//!
//! [metadata_cache]
//! enabled = true
//! ttl_seconds = 300
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for [`crate::QueryCompiler`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default)]
    pub limits: QueryLimits,

    #[serde(default)]
    pub metadata_cache: MetadataCacheConfig,
}

impl CompilerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_query_length == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_query_length must be greater than 0".to_string(),
            ));
        }
        if self.limits.max_clause_count == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_clause_count must be greater than 0".to_string(),
            ));
        }
        if self.metadata_cache.enabled && self.metadata_cache.ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "metadata_cache.ttl_seconds must be greater than 0 when the cache is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Input size limits, checked before any parsing work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    /// Maximum query length in bytes
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Maximum number of field clauses in one query
    #[serde(default = "default_max_clause_count")]
    pub max_clause_count: usize,
}

fn default_max_query_length() -> usize {
    4096
}

fn default_max_clause_count() -> usize {
    256
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_query_length: default_max_query_length(),
            max_clause_count: default_max_clause_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_seconds() -> u64 {
    300
}

impl MetadataCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for MetadataCacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.limits.max_query_length, 4096);
        assert_eq!(config.limits.max_clause_count, 256);
        assert!(config.metadata_cache.enabled);
        assert_eq!(config.metadata_cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CompilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompilerConfig::default());
    }

    #[test]
    fn test_partial_section() {
        let toml = r#"
            [limits]
            max_clause_count = 8
        "#;
        let config = CompilerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.limits.max_clause_count, 8);
        assert_eq!(config.limits.max_query_length, 4096);
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let toml = r#"
            [limits]
            max_query_length = 0
        "#;
        let err = CompilerConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("max_query_length")));
    }

    #[test]
    fn test_zero_ttl_allowed_when_cache_disabled() {
        let toml = r#"
            [metadata_cache]
            enabled = false
            ttl_seconds = 0
        "#;
        assert!(CompilerConfig::from_toml_str(toml).is_ok());

        let toml = r#"
            [metadata_cache]
            ttl_seconds = 0
        "#;
        assert!(CompilerConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = CompilerConfig::from_toml_str("[limits\nmax = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[metadata_cache]\nttl_seconds = 60").unwrap();

        let config = CompilerConfig::load(file.path()).unwrap();
        assert_eq!(config.metadata_cache.ttl_seconds, 60);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CompilerConfig::load("/nonexistent/catalog-query.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CompilerConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        assert_eq!(CompilerConfig::from_toml_str(&serialized).unwrap(), config);
    }
}
