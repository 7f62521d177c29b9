//! Handlers for the `/passengers` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use transferhub_core::error::CoreError;
use transferhub_core::types::DbId;
use transferhub_core::validation::PassengerQuery;
use transferhub_db::models::passenger::PassengerFilter;
use transferhub_db::repositories::PassengerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::projection::{PassengerData, PassengerList, PassengerResource};
use crate::query::PassengerListParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Passenger",
        id,
    })
}

/// GET /api/v1/passengers?passenger_type=&search=&per_page=&current_page=
///
/// `passenger_type` is mandatory; `search` matches name, surname, phone or type.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PassengerListParams>,
) -> AppResult<impl IntoResponse> {
    let query = PassengerQuery::resolve(
        params.per_page.as_deref(),
        params.current_page.as_deref(),
        params.passenger_type.as_deref(),
        params.search.as_deref(),
    )
    .map_err(CoreError::from)?;

    let filter = PassengerFilter {
        passenger_type: query.passenger_type,
        search: query.search,
    };
    let (passengers, total) = PassengerRepo::list(&state.pool, &filter, &query.page).await?;

    Ok(Json(ApiResponse::data(PassengerList {
        passengers: passengers.into_iter().map(PassengerResource::from).collect(),
        pagination: query.page.meta(total),
    })))
}

/// POST /api/v1/passengers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let raw = validation::json_object(payload)?;
    let input = validation::passenger(&raw)?;

    let passenger = PassengerRepo::create(&state.pool, &input).await?;
    tracing::info!(passenger_id = passenger.id, "Passenger created");

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::data(PassengerData {
                passenger: passenger.into(),
            })
            .with_message("Passenger created successfully"),
        ),
    ))
}

/// GET /api/v1/passengers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let passenger = PassengerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(PassengerData {
        passenger: passenger.into(),
    })))
}

/// PUT /api/v1/passengers/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    if !PassengerRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }

    let raw = validation::json_object(payload)?;
    let input = validation::passenger(&raw)?;

    let passenger = PassengerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(passenger_id = id, "Passenger updated");

    Ok(Json(
        ApiResponse::data(PassengerData {
            passenger: passenger.into(),
        })
        .with_message("Passenger was updated successfully"),
    ))
}

/// DELETE /api/v1/passengers/{id}
///
/// Refused with 409 while any transfer still links the passenger.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PassengerRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(passenger_id = id, "Passenger deleted");
    Ok(Json(ApiResponse::message("Passenger was deleted successfully")))
}
