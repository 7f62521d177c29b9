#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use transferhub_api::config::ServerConfig;
use transferhub_api::router::build_app_router;
use transferhub_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        json_logs: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_car(pool: &PgPool, plate: &str) -> i64 {
    let json = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/cars",
            serde_json::json!({ "plate": plate, "model": "Sedan" }),
        )
        .await,
    )
    .await;
    json["data"]["car"]["id"].as_i64().unwrap()
}

pub async fn create_driver(pool: &PgPool, full_name: &str, tc: &str) -> i64 {
    let json = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/drivers",
            serde_json::json!({ "full_name": full_name, "tc": tc }),
        )
        .await,
    )
    .await;
    json["data"]["driver"]["id"].as_i64().unwrap()
}

pub async fn create_passenger(pool: &PgPool, name: &str, passenger_type: &str) -> i64 {
    let json = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/passengers",
            serde_json::json!({
                "name": name,
                "surname": "Yilmaz",
                "phone": "+905551112233",
                "passenger_type": passenger_type,
            }),
        )
        .await,
    )
    .await;
    json["data"]["passenger"]["id"].as_i64().unwrap()
}
