//! Bundled Pokémon dataset
//!
//! The record provider behind both GraphQL queries. Records are parsed once
//! per process from the JSON embedded in the binary and never mutated
//! afterwards, so the same `&'static Dataset` is shared by every request.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashSet;

/// Raw dataset embedded at compile time.
const BUNDLED_JSON: &str = include_str!("../data/pokedex.json");

/// Largest id a record may carry; ids are exposed as GraphQL `Int`.
pub const MAX_RECORD_ID: u32 = i32::MAX as u32;

/// Errors raised while loading a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record id must be positive")]
    ZeroId,

    #[error("record id {0} exceeds i32::MAX")]
    IdOutOfRange(u32),

    #[error("duplicate record id {0}")]
    DuplicateId(u32),
}

/// Display names of a record, keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalizedName {
    pub english: String,
}

/// One record as supplied by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: LocalizedName,
    #[serde(rename = "type")]
    pub types: Vec<String>,
}

/// Read-only source of records
///
/// `all` yields records ordered by id; `by_id` returns `None` for any id not
/// present, including zero and negative ids.
pub trait RecordProvider: Send + Sync {
    fn all(&self) -> &[PokemonRecord];

    fn by_id(&self, id: i64) -> Option<&PokemonRecord>;
}

/// In-memory dataset ordered by id.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PokemonRecord>,
}

impl Dataset {
    /// Build a dataset from a list of records
    pub fn new(mut records: Vec<PokemonRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.id == 0 {
                return Err(DatasetError::ZeroId);
            }
            if record.id > MAX_RECORD_ID {
                return Err(DatasetError::IdOutOfRange(record.id));
            }
            if !seen.insert(record.id) {
                return Err(DatasetError::DuplicateId(record.id));
            }
        }
        records.sort_by_key(|r| r.id);
        Ok(Self { records })
    }

    /// Parse a JSON array of records
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let records: Vec<PokemonRecord> = serde_json::from_str(raw)?;
        Self::new(records)
    }

    /// The dataset shipped with the binary, parsed on first use.
    pub fn bundled() -> Result<&'static Dataset, DatasetError> {
        static BUNDLED: OnceCell<Dataset> = OnceCell::new();
        BUNDLED.get_or_try_init(|| -> Result<Dataset, DatasetError> {
            let dataset = Self::from_json(BUNDLED_JSON)?;
            tracing::debug!(records = dataset.len(), "Loaded bundled dataset");
            Ok(dataset)
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordProvider for Dataset {
    fn all(&self) -> &[PokemonRecord] {
        &self.records
    }

    fn by_id(&self, id: i64) -> Option<&PokemonRecord> {
        let id = u32::try_from(id).ok()?;
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|idx| &self.records[idx])
    }
}

impl RecordProvider for &'static Dataset {
    fn all(&self) -> &[PokemonRecord] {
        (**self).all()
    }

    fn by_id(&self, id: i64) -> Option<&PokemonRecord> {
        (**self).by_id(id)
    }
}
