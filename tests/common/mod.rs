#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::Value;
use stock_store::{routes::create_router, AppState};
use tower::ServiceExt;

pub const TEST_APP_NAME: &str = "storeApp";

/// Set up a fresh, migrated in-memory database.
///
/// The pool is pinned to one connection so every query sees the same
/// in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn create_test_app_state() -> (AppState, DatabaseConnection) {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    (AppState::new(db.clone(), TEST_APP_NAME), db)
}

/// Router over a fresh database, plus the state and connection behind it
/// for seeding and inspecting rows directly.
pub async fn build_test_router() -> (Router, AppState, DatabaseConnection) {
    let (state, db) = create_test_app_state().await;
    (create_router(state.clone()), state, db)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
