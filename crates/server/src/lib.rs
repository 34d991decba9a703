use axum::{Json, http::StatusCode, response::IntoResponse};

use serde::Serialize;

pub use catalog::{Catalog, CatalogError};
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod assets;
mod catalog;
mod server;

pub mod types {
    pub mod asset {
        pub use api_types::asset::{Asset, AssetAdd, AssetListResponse, AssetReplace};
    }
}

pub enum ServerError {
    Catalog(CatalogError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_catalog_error(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::InvalidFund(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Catalog(err) => (status_for_catalog_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<CatalogError> for ServerError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_not_found_maps_to_404() {
        let res = ServerError::from(CatalogError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn catalog_invalid_fund_maps_to_422() {
        let res = ServerError::from(CatalogError::InvalidFund("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
