//! End-to-end query compilation.

use crate::config::CompilerConfig;
use crate::error::{ConfigError, QueryError, QueryResult};
use crate::ir::Criterion;
use crate::metadata::{CachingResolver, MetadataResolver};
use crate::render::{BackendQuery, QueryRenderer, SearchRenderer};
use crate::syntax::{self, SyntaxNode};
use crate::transform;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Runs the whole pipeline: text, syntax tree, criterion, backend query.
///
/// Holds no per-query state; one compiler can serve any number of threads.
pub struct QueryCompiler {
    resolver: Arc<dyn MetadataResolver>,
    renderer: Arc<dyn QueryRenderer>,
    config: CompilerConfig,
}

impl QueryCompiler {
    /// Compiler with the default configuration
    pub fn new<R: MetadataResolver + 'static>(resolver: R) -> Self {
        Self::build(resolver, CompilerConfig::default())
    }

    /// Validate `config` and build a compiler from it.
    ///
    /// Wraps `resolver` in a [`CachingResolver`] when the metadata cache is enabled.
    pub fn with_config<R: MetadataResolver + 'static>(
        resolver: R,
        config: CompilerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(resolver, config))
    }

    fn build<R: MetadataResolver + 'static>(resolver: R, config: CompilerConfig) -> Self {
        let resolver: Arc<dyn MetadataResolver> = if config.metadata_cache.enabled {
            Arc::new(CachingResolver::new(resolver, config.metadata_cache.ttl()))
        } else {
            Arc::new(resolver)
        };

        Self {
            resolver,
            renderer: Arc::new(SearchRenderer::new()),
            config,
        }
    }

    /// Replace the backend renderer
    pub fn with_renderer<Q: QueryRenderer + 'static>(mut self, renderer: Q) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    /// Parse query text, enforcing the configured limits
    pub fn parse(&self, text: &str) -> QueryResult<SyntaxNode> {
        let limits = &self.config.limits;
        if text.len() > limits.max_query_length {
            return Err(QueryError::QueryTooLong {
                length: text.len(),
                max: limits.max_query_length,
            });
        }

        let node = syntax::parse(text)?;

        let count = node.clause_count();
        if count > limits.max_clause_count {
            return Err(QueryError::TooManyClauses {
                count,
                max: limits.max_clause_count,
            });
        }
        Ok(node)
    }

    /// Parse and translate query text into a criterion
    pub fn translate(&self, text: &str) -> QueryResult<Criterion> {
        let node = self.parse(text)?;
        Ok(transform::translate(&node, &*self.resolver)?)
    }

    /// Compile query text into a backend query.
    ///
    /// The first failing stage short-circuits; nothing partial is returned.
    pub fn compile(&self, text: &str) -> QueryResult<BackendQuery> {
        match self.translate(text) {
            Ok(criterion) => {
                debug!(
                    renderer = self.renderer.name(),
                    leaves = criterion.leaf_count(),
                    "compiled query"
                );
                Ok(self.compile_criterion(&criterion))
            }
            Err(err) => {
                debug!(error = %err, "query rejected");
                Err(err)
            }
        }
    }

    /// Render an already-validated criterion
    pub fn compile_criterion(&self, criterion: &Criterion) -> BackendQuery {
        self.renderer.render(criterion)
    }

    /// Compile independent queries in parallel; results keep input order.
    pub fn compile_batch<S>(&self, texts: &[S]) -> Vec<QueryResult<BackendQuery>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(queries = texts.len(), "compiling batch");
        texts
            .par_iter()
            .map(|text| self.compile(text.as_ref()))
            .collect()
    }
}
