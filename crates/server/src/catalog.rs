//! The module contains the in-memory catalog the server exposes.
use api_types::AssetKind;
use api_types::asset::Asset;
use thiserror::Error;

/// Catalog custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid fund: {0}")]
    InvalidFund(String),
}

type ResultCatalog<T> = Result<T, CatalogError>;

/// The canonical asset catalog.
///
/// Starts from a fixed demo seed of four records. Created assets derive
/// their id and code from the fund identifier, so adding the same fund
/// twice produces two records with the same id: the catalog does not
/// deduplicate, clients observe the collision.
#[derive(Clone, Debug)]
pub struct Catalog {
    assets: Vec<Asset>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// A catalog holding the demo seed.
    pub fn new() -> Self {
        Self {
            assets: vec![
                record("1", "TR-MAIN", AssetKind::Tree, "Main tree", "100%"),
                record("2", "AAA", AssetKind::Fund, "Fund AAA", "40%"),
                record("3", "BBB", AssetKind::Fund, "Fund BBB", "35%"),
                record("4", "ST-01", AssetKind::Strategy, "Momentum strategy", "25%"),
            ],
        }
    }

    pub fn list(&self) -> Vec<Asset> {
        self.assets.clone()
    }

    pub fn delete(&mut self, id: &str) -> ResultCatalog<()> {
        match self.assets.iter().position(|asset| asset.id == id) {
            Some(index) => {
                self.assets.remove(index);
                Ok(())
            }
            None => Err(CatalogError::KeyNotFound(id.to_string())),
        }
    }

    /// Creates a record from the fund identifier and appends it.
    pub fn add(&mut self, fund: &str) -> ResultCatalog<Asset> {
        let asset = asset_from_fund(fund)?;
        self.assets.push(asset.clone());
        Ok(asset)
    }

    /// Replaces the record wholesale: the old one is dropped, the new one
    /// is appended at the end.
    pub fn replace(&mut self, old_id: &str, fund: &str) -> ResultCatalog<Asset> {
        let Some(index) = self.assets.iter().position(|asset| asset.id == old_id) else {
            return Err(CatalogError::KeyNotFound(old_id.to_string()));
        };
        let asset = asset_from_fund(fund)?;
        self.assets.remove(index);
        self.assets.push(asset.clone());
        Ok(asset)
    }

    /// Appends the canned import batch and returns it.
    pub fn import(&mut self) -> Vec<Asset> {
        let batch = vec![
            record("101", "ST-101", AssetKind::Strategy, "Breakout", "0%"),
            record("102", "ST-102", AssetKind::Strategy, "Carry", "0%"),
            record("103", "ST-103", AssetKind::Strategy, "Mean reversion", "0%"),
        ];
        self.assets.extend(batch.iter().cloned());
        batch
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn record(id: &str, code: &str, kind: AssetKind, name: &str, weight: &str) -> Asset {
    Asset {
        id: id.to_string(),
        code: code.to_string(),
        kind,
        name: name.to_string(),
        weight: weight.to_string(),
    }
}

/// Derives the created record from the fund identifier: the code is the
/// last token of the fund name, the id its lowercase form.
fn asset_from_fund(fund: &str) -> ResultCatalog<Asset> {
    let Some(code) = fund.split_whitespace().last() else {
        return Err(CatalogError::InvalidFund("empty fund name".to_string()));
    };

    Ok(Asset {
        id: code.to_lowercase(),
        code: code.to_string(),
        kind: AssetKind::Fund,
        name: fund.to_string(),
        weight: "0%".to_string(),
    })
}
