//! Handlers for the `/drivers` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use transferhub_core::error::CoreError;
use transferhub_core::types::DbId;
use transferhub_core::validation::AvailabilityQuery;
use transferhub_db::models::driver::DriverFilter;
use transferhub_db::repositories::DriverRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::projection::{DriverData, DriverList, DriverResource};
use crate::query::AvailabilityListParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Driver",
        id,
    })
}

/// GET /api/v1/drivers?per_page=&current_page=&transfer_start_time=&transfer_finish_time=&search=
///
/// List drivers, newest first. With a window, drivers that have any
/// transfer overlapping it are left out.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AvailabilityListParams>,
) -> AppResult<impl IntoResponse> {
    let query = AvailabilityQuery::resolve(
        params.per_page.as_deref(),
        params.current_page.as_deref(),
        params.transfer_start_time.as_deref(),
        params.transfer_finish_time.as_deref(),
        params.search.as_deref(),
    )
    .map_err(CoreError::from)?;

    let filter = DriverFilter {
        available_between: query.window,
        search: query.search,
    };
    let (drivers, total) = DriverRepo::list(&state.pool, &filter, &query.page).await?;

    Ok(Json(ApiResponse::data(DriverList {
        drivers: drivers.into_iter().map(DriverResource::from).collect(),
        pagination: query.page.meta(total),
    })))
}

/// POST /api/v1/drivers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let raw = validation::json_object(payload)?;
    let input = validation::driver(&state.pool, &raw, None).await?;

    let driver = DriverRepo::create(&state.pool, &input).await?;
    tracing::info!(driver_id = driver.id, "Driver created");

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::data(DriverData {
                driver: driver.into(),
            })
            .with_message("Driver created successfully"),
        ),
    ))
}

/// GET /api/v1/drivers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let driver = DriverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(DriverData {
        driver: driver.into(),
    })))
}

/// PUT /api/v1/drivers/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    if !DriverRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }

    let raw = validation::json_object(payload)?;
    let input = validation::driver(&state.pool, &raw, Some(id)).await?;

    let driver = DriverRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(driver_id = id, "Driver updated");

    Ok(Json(
        ApiResponse::data(DriverData {
            driver: driver.into(),
        })
        .with_message("Driver was updated successfully"),
    ))
}

/// DELETE /api/v1/drivers/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DriverRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(driver_id = id, "Driver deleted");
    Ok(Json(ApiResponse::message("Driver was deleted successfully")))
}
