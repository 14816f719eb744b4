use crate::config::ServerConfig;
use crate::dataset::{Dataset, RecordProvider};
use crate::error::ServerResult;
use crate::schema::{build_schema, PokedexSchema, SharedProvider};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Record provider (shared across requests)
    pub provider: SharedProvider,

    /// Executable GraphQL schema
    pub schema: PokedexSchema,
}

impl ServerState {
    /// Create state over the bundled dataset
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let dataset = Dataset::bundled()?;
        Ok(Self::with_provider(config, Arc::new(dataset)))
    }

    /// Create state over any record provider
    pub fn with_provider(config: ServerConfig, provider: Arc<dyn RecordProvider>) -> Self {
        let schema = build_schema(provider.clone(), config.image_base_url.clone());

        Self {
            config: Arc::new(config),
            provider,
            schema,
        }
    }

    /// Number of records served
    pub fn record_count(&self) -> usize {
        self.provider.all().len()
    }
}
