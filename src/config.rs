use crate::error::{ServerError, ServerResult};
use crate::mapper::DEFAULT_IMAGE_BASE_URL;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Path the GraphQL endpoint is mounted on
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Base URL of the thumbnail images
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Cross-origin settings, used when `enable_cors` is set
    #[serde(default)]
    pub cors: CorsConfig,

    /// Serve GraphiQL on browser GETs to the endpoint
    #[serde(default = "default_true")]
    pub enable_playground: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Cross-origin configuration for the GraphQL endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// HTTP verbs accepted on the endpoint
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_methods: default_allowed_methods(),
        }
    }
}

impl CorsConfig {
    /// Parse `allowed_methods` into HTTP methods.
    pub fn methods(&self) -> Result<Vec<Method>, ServerError> {
        self.allowed_methods
            .iter()
            .map(|m| {
                let upper = m.trim().to_ascii_uppercase();
                match upper.as_str() {
                    "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "HEAD" | "OPTIONS" => {
                        Method::from_bytes(upper.as_bytes())
                            .map_err(|e| ServerError::Config(format!("Invalid method {m}: {e}")))
                    }
                    _ => Err(ServerError::Config(format!("Unsupported HTTP method: {m}"))),
                }
            })
            .collect()
    }

    /// Whether `method` is in the allowed set.
    pub fn allows(&self, method: &Method) -> bool {
        self.allowed_methods
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(method.as_str()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            graphql_path: default_graphql_path(),
            image_base_url: default_image_base_url(),
            enable_cors: default_true(),
            cors: CorsConfig::default(),
            enable_playground: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("pokedex").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("POKEDEX")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_methods")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the router cannot be built from
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.graphql_path.starts_with('/') {
            return Err(ServerError::Config(format!(
                "graphql_path must start with '/': {}",
                self.graphql_path
            )));
        }

        if self.enable_cors {
            if self.cors.allowed_methods.is_empty() {
                return Err(ServerError::Config(
                    "cors.allowed_methods must not be empty".to_string(),
                ));
            }
            self.cors.methods()?;
        }

        Ok(())
    }

    /// Cross-origin settings when CORS is enabled
    pub fn cors_options(&self) -> Option<&CorsConfig> {
        self.enable_cors.then_some(&self.cors)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    64
}

fn default_graphql_path() -> String {
    "/api/graphql".to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_allowed_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
