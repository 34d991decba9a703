use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use server::types::asset::{Asset, AssetListResponse};
use server::{Catalog, ServerState, router};

fn app() -> Router {
    let state = ServerState {
        catalog: Arc::new(RwLock::new(Catalog::new())),
    };
    router(state)
}

async fn json_body<T: serde::de::DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_returns_the_seed() {
    let app = app();

    let res = app.oneshot(get("/assets")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 4);
    assert_eq!(body.assets[1].id, "2");
}

#[tokio::test]
async fn delete_then_list_shrinks_the_catalog() {
    let app = app();

    let res = app.clone().oneshot(delete("/assets/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get("/assets")).await.unwrap();
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 3);
    assert!(body.assets.iter().all(|asset| asset.id != "2"));
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
    let app = app();

    let res = app.oneshot(delete("/assets/99")).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = json_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn add_creates_a_record_from_the_fund() {
    let app = app();

    let res = app
        .clone()
        .oneshot(post_json("/assets", r#"{"fund":"FUND – AAA"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let asset: Asset = json_body(res).await;
    assert_eq!(asset.id, "aaa");
    assert_eq!(asset.code, "AAA");
    assert_eq!(asset.weight, "0%");

    let res = app.oneshot(get("/assets")).await.unwrap();
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 5);
}

#[tokio::test]
async fn add_with_a_blank_fund_is_422() {
    let app = app();

    let res = app
        .oneshot(post_json("/assets", r#"{"fund":"  "}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn replace_swaps_the_record() {
    let app = app();

    let res = app
        .clone()
        .oneshot(put_json("/assets/3", r#"{"fund":"FUND – CCC"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let asset: Asset = json_body(res).await;
    assert_eq!(asset.id, "ccc");

    let res = app.oneshot(get("/assets")).await.unwrap();
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 4);
    assert!(body.assets.iter().all(|asset| asset.id != "3"));
}

#[tokio::test]
async fn replace_unknown_id_is_404() {
    let app = app();

    let res = app
        .oneshot(put_json("/assets/99", r#"{"fund":"FUND – CCC"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_appends_the_batch() {
    let app = app();

    let res = app
        .clone()
        .oneshot(post_json("/assets/import", ""))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 3);
    assert_eq!(body.assets[0].id, "101");

    let res = app.oneshot(get("/assets")).await.unwrap();
    let body: AssetListResponse = json_body(res).await;
    assert_eq!(body.assets.len(), 7);
}
