//! The module contains the ordered catalog of asset records.
use api_types::asset::Asset;
use tracing::warn;

/// The in-memory catalog of assets.
///
/// Insertion order is meaningful only for display. Uniqueness of `id` is
/// expected to hold after every mutation: `remove` drops exactly the record
/// with the matching id, while the append operations do not deduplicate
/// against existing ids. An append that introduces a duplicate id is logged
/// and kept as-is.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    assets: Vec<Asset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole catalog, e.g. with the initial fetch result.
    pub fn replace_all(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
    }

    /// Appends one record without deduplicating against existing ids.
    pub fn append(&mut self, asset: Asset) {
        if self.contains(&asset.id) {
            warn!(id = %asset.id, "append introduces a duplicate asset id");
        }
        self.assets.push(asset);
    }

    /// Appends a whole batch, e.g. an import result.
    pub fn append_all(&mut self, assets: Vec<Asset>) {
        for asset in assets {
            self.append(asset);
        }
    }

    /// Removes the record with the given id, if present.
    pub fn remove(&mut self, id: &str) -> Option<Asset> {
        match self.assets.iter().position(|asset| asset.id == id) {
            Some(index) => Some(self.assets.remove(index)),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assets.iter().any(|asset| asset.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    /// Display position of the record with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.assets.iter().position(|asset| asset.id == id)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
