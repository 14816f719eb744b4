//! Pokedex GraphQL - read-only GraphQL endpoint over a bundled Pokémon dataset
//!
//! The dataset is embedded in the binary and loaded once per process. Two
//! queries are exposed on a single endpoint:
//!
//! - `pokemones(limit: Int): [Pokemon!]!` - records in id order, optionally limited
//! - `pokemonById(id: Int): Pokemon` - one record, `null` when unknown
//!
//! Each record is mapped to the public `Pokemon` shape with a zero-padded id
//! and a derived thumbnail URL.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pokedex::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     pokedex::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - `GET|POST /api/graphql` - GraphQL (GraphiQL for browser GETs)
//! - `OPTIONS /api/graphql` - CORS pre-flight, when CORS is enabled
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

pub mod config;
pub mod dataset;
pub mod error;
pub mod mapper;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod server;
pub mod state;

pub use config::{CorsConfig, ServerConfig};
pub use dataset::{Dataset, DatasetError, PokemonRecord, RecordProvider};
pub use error::{ServerError, ServerResult};
pub use mapper::Pokemon;
pub use schema::{build_schema, export_sdl, PokedexSchema};
pub use server::{build_router, start_server};
pub use state::ServerState;
