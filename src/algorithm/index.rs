//! Tile index keyed by file name and the nearest-color search over it

use crate::analysis::signature::ColorSignature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One indexed tile as produced by the indexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// File name of the source image, unique within a run
    pub id: String,
    /// Mean color of the resized thumbnail
    pub signature: ColorSignature,
    /// Location of the persisted thumbnail
    pub thumbnail: PathBuf,
}

/// Mapping from tile file name to its color signature
///
/// Iteration is in ascending name order. Persistence and the nearest-match
/// tie-break both follow that order, so results do not depend on directory
/// listing order or hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileIndex {
    entries: BTreeMap<String, ColorSignature>,
}

impl FromIterator<TileRecord> for TileIndex {
    fn from_iter<T: IntoIterator<Item = TileRecord>>(records: T) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|record| (record.id, record.signature))
                .collect(),
        }
    }
}

impl TileIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a tile, returning the previous signature for that name
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        signature: ColorSignature,
    ) -> Option<ColorSignature> {
        self.entries.insert(id.into(), signature)
    }

    /// Signature stored for a tile name
    pub fn get(&self, id: &str) -> Option<ColorSignature> {
        self.entries.get(id).copied()
    }

    /// Number of indexed tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no tiles
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tiles in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColorSignature)> {
        self.entries
            .iter()
            .map(|(id, signature)| (id.as_str(), *signature))
    }

    /// Closest tile to `query` by L1 distance, with that distance
    ///
    /// Scans every entry in index order; a tile replaces the current best only
    /// when strictly closer, so the first of several equidistant tiles wins.
    /// Returns `None` for an empty index.
    pub fn nearest(&self, query: ColorSignature) -> Option<(&str, u32)> {
        self.iter().fold(None, |best, (id, signature)| {
            let distance = query.distance(signature);
            match best {
                Some((_, best_distance)) if distance >= best_distance => best,
                _ => Some((id, distance)),
            }
        })
    }
}
