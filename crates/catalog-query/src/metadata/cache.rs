//! TTL cache in front of a slower resolver.

use super::{FieldDescriptor, MetadataError, MetadataResolver};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

struct CachedEntry {
    descriptor: FieldDescriptor,
    fetched_at: Instant,
}

/// Memoizes successful lookups of an inner resolver for `ttl`.
///
/// Failures (unknown field, catalog unreachable) are passed through and never
/// cached, so a field added to the catalog becomes visible on the next query.
pub struct CachingResolver<R> {
    inner: R,
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedEntry>>,
}

impl<R: MetadataResolver> CachingResolver<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every cached descriptor
    pub fn invalidate(&self) {
        self.entries.write().clear();
    }

    /// Drop the cached descriptor for one field
    pub fn invalidate_field(&self, field: &str) {
        self.entries.write().remove(field);
    }

    pub fn cached_len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn fresh(&self, field: &str) -> Option<FieldDescriptor> {
        let entries = self.entries.read();
        let entry = entries.get(field)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.descriptor.clone())
        } else {
            None
        }
    }
}

impl<R: MetadataResolver> MetadataResolver for CachingResolver<R> {
    fn resolve(&self, field: &str) -> Result<FieldDescriptor, MetadataError> {
        if let Some(descriptor) = self.fresh(field) {
            trace!(field, "metadata cache hit");
            return Ok(descriptor);
        }

        debug!(field, "metadata cache miss");
        let descriptor = self.inner.resolve(field)?;
        self.entries.write().insert(
            field.to_string(),
            CachedEntry {
                descriptor: descriptor.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(descriptor)
    }
}
