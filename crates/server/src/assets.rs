//! Asset catalog API endpoints

use api_types::asset::{Asset, AssetAdd, AssetListResponse, AssetReplace};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

/// Handle requests for listing the whole catalog
pub async fn list(State(state): State<ServerState>) -> Json<AssetListResponse> {
    let assets = state.catalog.read().await.list();
    Json(AssetListResponse { assets })
}

/// Handle requests for deleting one asset
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.catalog.write().await.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for creating an asset from a fund identifier
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<AssetAdd>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state.catalog.write().await.add(&payload.fund)?;
    Ok(Json(asset))
}

/// Handle requests for replacing an existing asset
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssetReplace>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state.catalog.write().await.replace(&id, &payload.fund)?;
    Ok(Json(asset))
}

/// Handle requests for importing the canned batch
pub async fn import(State(state): State<ServerState>) -> Json<AssetListResponse> {
    let assets = state.catalog.write().await.import();
    Json(AssetListResponse { assets })
}
