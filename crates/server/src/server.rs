use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{assets, catalog::Catalog};

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<RwLock<Catalog>>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/assets", get(assets::list).post(assets::add))
        .route(
            "/assets/{id}",
            axum::routing::delete(assets::delete).put(assets::replace),
        )
        .route("/assets/import", post(assets::import))
        .with_state(state)
}

pub async fn run(catalog: Catalog) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(catalog, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    catalog: Catalog,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        catalog: Arc::new(RwLock::new(catalog)),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    catalog: Catalog,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(catalog, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
