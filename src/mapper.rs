//! Record to response mapping
//!
//! Turns a provider record into the public `Pokemon` shape: the id is
//! rendered as a zero-padded string and the thumbnail URL is derived from it.

use crate::dataset::PokemonRecord;

/// Default location of the thumbnail images.
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/fforres/pokemon-local-database/master/src/data/thumbnails";

/// Minimum width of a padded id.
const PADDED_ID_WIDTH: usize = 3;

/// Public response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    /// Zero-padded id, e.g. `"001"`.
    pub id: String,
    pub name: String,
    /// Raw numeric id.
    pub number: u32,
    pub image: String,
    pub types: Vec<String>,
}

impl Pokemon {
    pub fn from_record(record: &PokemonRecord, image_base: &str) -> Self {
        let id = padded_id(record.id);
        let image = image_url(image_base, &id);
        Self {
            image,
            id,
            name: record.name.english.clone(),
            number: record.id,
            types: record.types.clone(),
        }
    }
}

/// Decimal id left-padded with zeros to at least three characters.
///
/// Wider ids are left as-is.
pub fn padded_id(id: u32) -> String {
    format!("{id:0>width$}", width = PADDED_ID_WIDTH)
}

/// `<base>/<padded>.png`, without doubling a trailing slash on `base`.
pub fn image_url(base: &str, padded: &str) -> String {
    format!("{}/{padded}.png", base.trim_end_matches('/'))
}
