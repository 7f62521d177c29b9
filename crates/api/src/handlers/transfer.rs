//! Handlers for the `/transfers` resource.
//!
//! Writes go through [`TransferRepo::create`] / [`TransferRepo::replace`],
//! which persist the transfer and its full passenger list atomically; the
//! response is then built from a fresh, fully loaded read.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use transferhub_core::error::CoreError;
use transferhub_core::pagination::Page;
use transferhub_core::types::DbId;
use transferhub_db::models::transfer::TransferWithRelations;
use transferhub_db::repositories::TransferRepo;
use transferhub_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::projection::{TransferData, TransferList, TransferResource};
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Transfer",
        id,
    })
}

/// Re-read a transfer that was just written, with all relations.
async fn load_written(pool: &DbPool, id: DbId) -> AppResult<TransferWithRelations> {
    TransferRepo::find_by_id_with_relations(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("transfer {id} missing right after write"))
        })
}

/// GET /api/v1/transfers?per_page=&current_page=
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = Page::resolve(params.per_page.as_deref(), params.current_page.as_deref())
        .map_err(CoreError::from)?;

    let (transfers, total) = TransferRepo::list_with_relations(&state.pool, &page).await?;

    Ok(Json(ApiResponse::data(TransferList {
        transfers: transfers.into_iter().map(TransferResource::from).collect(),
        pagination: page.meta(total),
    })))
}

/// POST /api/v1/transfers
///
/// Create a transfer together with one passenger link per listed id.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let raw = validation::json_object(payload)?;
    let input = validation::transfer(&state.pool, &raw).await?;

    let transfer = TransferRepo::create(&state.pool, &input).await?;
    tracing::info!(
        transfer_id = transfer.id,
        car_id = transfer.car_id,
        driver_id = transfer.driver_id,
        passengers = input.passenger_ids.len(),
        "Transfer created"
    );

    let loaded = load_written(&state.pool, transfer.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::data(TransferData {
                transfer: loaded.into(),
            })
            .with_message("Transfer created successfully"),
        ),
    ))
}

/// GET /api/v1/transfers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let loaded = TransferRepo::find_by_id_with_relations(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(TransferData {
        transfer: loaded.into(),
    })))
}

/// PUT /api/v1/transfers/{id}
///
/// Replace the transfer's fields and its entire passenger list.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let raw = validation::json_object(payload)?;
    let input = validation::transfer(&state.pool, &raw).await?;

    TransferRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        transfer_id = id,
        passengers = input.passenger_ids.len(),
        "Transfer replaced"
    );

    let loaded = load_written(&state.pool, id).await?;
    Ok(Json(
        ApiResponse::data(TransferData {
            transfer: loaded.into(),
        })
        .with_message("Transfer updated successfully"),
    ))
}

/// DELETE /api/v1/transfers/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TransferRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(transfer_id = id, "Transfer deleted");
    Ok(Json(ApiResponse::message("Transfer was deleted successfully")))
}
