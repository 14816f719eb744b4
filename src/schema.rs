//! GraphQL schema
//!
//! Two read-only root fields over the record provider:
//!
//! ```graphql
//! type Query {
//!   pokemones(limit: Int): [Pokemon!]!
//!   pokemonById(id: Int): Pokemon
//! }
//! type Pokemon {
//!   id: String
//!   nombre: String
//!   numero: Int
//!   imagen: String
//!   tipos: [String!]!
//! }
//! ```

use crate::dataset::RecordProvider;
use crate::mapper::Pokemon;
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};
use std::sync::Arc;

/// The complete GraphQL schema
pub type PokedexSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Shared record provider, stored as schema data.
pub type SharedProvider = Arc<dyn RecordProvider>;

/// Base URL used to derive thumbnail links.
#[derive(Debug, Clone)]
pub struct ImageBaseUrl(pub String);

/// Build the schema over `provider`
pub fn build_schema(provider: SharedProvider, image_base: impl Into<String>) -> PokedexSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(provider)
        .data(ImageBaseUrl(image_base.into()))
        .finish()
}

/// Schema definition language for the schema.
pub fn export_sdl() -> String {
    PokedexSchema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .finish()
        .sdl()
}

/// Apply the `limit` argument of `pokemones`.
///
/// A missing limit and a limit of `0` both return everything. Negative values
/// drop that many records from the end.
pub fn select_limit<T>(items: &[T], limit: Option<i32>) -> &[T] {
    match limit {
        None | Some(0) => items,
        Some(n) if n > 0 => {
            let n = usize::try_from(n).unwrap_or(usize::MAX);
            &items[..items.len().min(n)]
        }
        Some(n) => {
            let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            &items[..items.len().saturating_sub(drop)]
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All records in id order, optionally limited.
    async fn pokemones(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
    ) -> async_graphql::Result<Vec<Pokemon>> {
        let provider = ctx.data::<SharedProvider>()?;
        let ImageBaseUrl(base) = ctx.data::<ImageBaseUrl>()?;

        let selected = select_limit(provider.all(), limit);
        tracing::debug!(?limit, count = selected.len(), "pokemones");

        Ok(selected
            .iter()
            .map(|record| Pokemon::from_record(record, base))
            .collect())
    }

    /// A single record, or `null` when the id is unknown.
    async fn pokemon_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> async_graphql::Result<Option<Pokemon>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let provider = ctx.data::<SharedProvider>()?;
        let ImageBaseUrl(base) = ctx.data::<ImageBaseUrl>()?;

        let found = provider.by_id(i64::from(id));
        tracing::debug!(id, found = found.is_some(), "pokemonById");

        Ok(found.map(|record| Pokemon::from_record(record, base)))
    }
}

#[Object]
impl Pokemon {
    async fn id(&self) -> Option<&str> {
        Some(self.id.as_str())
    }

    #[graphql(name = "nombre")]
    async fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    /// `null` when the id does not fit a GraphQL `Int`.
    #[graphql(name = "numero")]
    async fn number(&self) -> Option<i32> {
        i32::try_from(self.number).ok()
    }

    #[graphql(name = "imagen")]
    async fn image(&self) -> Option<&str> {
        Some(self.image.as_str())
    }

    #[graphql(name = "tipos")]
    async fn types(&self) -> &[String] {
        &self.types
    }
}
