//! Handlers for the `/cars` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use transferhub_core::error::CoreError;
use transferhub_core::types::DbId;
use transferhub_core::validation::AvailabilityQuery;
use transferhub_db::models::car::CarFilter;
use transferhub_db::repositories::CarRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::projection::{CarData, CarList, CarResource};
use crate::query::AvailabilityListParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Car", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cars?per_page=&current_page=&transfer_start_time=&transfer_finish_time=&search=
///
/// List cars, newest first. With a window, only cars free for the whole
/// window are returned.
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

    let filter = CarFilter {
        available_between: query.window,
        search: query.search,
    };
    let (cars, total) = CarRepo::list(&state.pool, &filter, &query.page).await?;

    Ok(Json(ApiResponse::data(CarList {
        cars: cars.into_iter().map(CarResource::from).collect(),
        pagination: query.page.meta(total),
    })))
}

/// POST /api/v1/cars
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let raw = validation::json_object(payload)?;
    let input = validation::car(&state.pool, &raw, None).await?;

    let car = CarRepo::create(&state.pool, &input).await?;
    tracing::info!(car_id = car.id, plate = %car.plate, "Car created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CarData { car: car.into() }).with_message("Car created successfully")),
    ))
}

/// GET /api/v1/cars/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let car = CarRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(CarData { car: car.into() })))
}

/// PUT /api/v1/cars/{id}
///
/// Replace a car's fields. The car's own plate does not count as taken.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    if !CarRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }

    let raw = validation::json_object(payload)?;
    let input = validation::car(&state.pool, &raw, Some(id)).await?;

    let car = CarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(car_id = id, "Car updated");

    Ok(Json(
        ApiResponse::data(CarData { car: car.into() }).with_message("Car was updated successfully"),
    ))
}

/// DELETE /api/v1/cars/{id}
///
/// Refused with 409 while any transfer references the car.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CarRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(car_id = id, "Car deleted");
    Ok(Json(ApiResponse::message("Car was deleted successfully")))
}
