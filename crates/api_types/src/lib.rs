use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetKind {
    Tree,
    #[default]
    Fund,
    Strategy,
}

impl AssetKind {
    /// Returns the canonical kind string used in displays and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "TREE",
            Self::Fund => "FUND",
            Self::Strategy => "STRATEGY",
        }
    }
}

pub mod asset {
    use super::*;

    /// A single asset record. Replaced wholesale on update, never patched.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Asset {
        /// Unique within one catalog.
        pub id: String,
        pub code: String,
        pub kind: AssetKind,
        pub name: String,
        /// Percentage display value, e.g. `"40%"`.
        pub weight: String,
    }

    /// Response body for listing the catalog and for import batches.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetListResponse {
        pub assets: Vec<Asset>,
    }

    /// Request body for creating an asset from a fund identifier.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetAdd {
        pub fund: String,
    }

    /// Request body for replacing an existing asset.
    ///
    /// The id of the asset being superseded travels in the path.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetReplace {
        pub fund: String,
    }
}
