//! Tests for `AppError` → HTTP response mapping and router-level fallbacks.
//!
//! The `AppError` tests call `IntoResponse` directly and need no server;
//! the fallback tests drive the full router.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sqlx::PgPool;
use transferhub_api::error::AppError;
use transferhub_core::error::CoreError;
use transferhub_core::validation::FieldErrors;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Transfer",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], 1);
    assert_eq!(json["message"], "Transfer with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_422_with_field_map() {
    let mut errors = FieldErrors::new();
    errors.add("plate", "The plate field is required.");
    errors.add("model", "The model field is required.");

    let (status, json) = error_to_response(AppError::Core(CoreError::Validation(errors))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], 1);
    assert_eq!(json["messages"]["plate"][0], "The plate field is required.");
    assert_eq!(json["messages"]["model"][0], "The model field is required.");
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn path_not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound("Resource not found".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], 1);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Resource not found");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Request body must be a JSON object".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["message"], "Request body must be a JSON object");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("still referenced".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "still referenced");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("connection string postgres://secret@db".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
    assert!(json.get("file").is_none());
    assert!(json.get("line").is_none());
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_are_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Router fallbacks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404_envelope(pool: PgPool) {
    let response = common::get(common::build_test_app(pool), "/api/v1/trucks").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_method_returns_405_envelope(pool: PgPool) {
    let response = common::delete(common::build_test_app(pool), "/api/v1/cars").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_returns_400_envelope(pool: PgPool) {
    let response =
        common::post_raw(common::build_test_app(pool), "/api/v1/cars", "{\"plate\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let response = common::get(common::build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_returns_404_envelope(pool: PgPool) {
    let response = common::get(common::build_test_app(pool.clone()), "/api/v1/cars/abc").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "{content_type}");
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
    assert_eq!(json["code"], "NOT_FOUND");

    let response = common::delete(common::build_test_app(pool), "/api/v1/transfers/1x").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_query_key_returns_400_envelope(pool: PgPool) {
    let response = common::get(
        common::build_test_app(pool),
        "/api/v1/cars?per_page=1&per_page=2",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], 1);
    assert_eq!(json["code"], "BAD_REQUEST");
}
