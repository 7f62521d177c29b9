//! Request validation that needs the database.
//!
//! Shape and format rules run in `transferhub_core::validation`; this module
//! adds the `exists` and `unique` rules on top and returns either a typed
//! input or every collected failure at once.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{Map, Value};
use transferhub_core::types::DbId;
use transferhub_core::validation::messages;
use transferhub_core::validation::{
    CarDraft, CarInput, DriverDraft, DriverInput, PassengerDraft, PassengerInput, TransferDraft,
    TransferInput,
};
use transferhub_db::repositories::{CarRepo, DriverRepo, PassengerRepo};
use transferhub_db::DbPool;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body into an object, mapping syntax errors and non-object
/// bodies to a 400 response.
pub fn json_object(payload: Result<Json<Value>, JsonRejection>) -> AppResult<Map<String, Value>> {
    let Json(value) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Validate a car payload. `self_id` is the car being updated, if any.
pub async fn car(
    pool: &DbPool,
    raw: &Map<String, Value>,
    self_id: Option<DbId>,
) -> AppResult<CarInput> {
    let (draft, mut errors) = CarDraft::from_raw(raw);

    if let Some(plate) = &draft.plate {
        if CarRepo::plate_taken(pool, plate, self_id).await? {
            errors.add("plate", messages::taken("plate"));
        }
    }

    Ok(draft.finish(errors)?)
}

/// Validate a driver payload. `self_id` is the driver being updated, if any.
pub async fn driver(
    pool: &DbPool,
    raw: &Map<String, Value>,
    self_id: Option<DbId>,
) -> AppResult<DriverInput> {
    let (draft, mut errors) = DriverDraft::from_raw(raw);

    if let Some(tc) = &draft.tc {
        if DriverRepo::tc_taken(pool, tc, self_id).await? {
            errors.add("tc", messages::taken("tc"));
        }
    }

    Ok(draft.finish(errors)?)
}

/// Validate a passenger payload. Passengers carry no database-backed rules.
pub fn passenger(raw: &Map<String, Value>) -> AppResult<PassengerInput> {
    let (draft, errors) = PassengerDraft::from_raw(raw);
    Ok(draft.finish(errors)?)
}

/// Validate a transfer payload, including existence of the referenced car,
/// driver and every listed passenger.
pub async fn transfer(pool: &DbPool, raw: &Map<String, Value>) -> AppResult<TransferInput> {
    let (draft, mut errors) = TransferDraft::from_raw(raw);

    if let Some(car_id) = draft.car_id {
        if !CarRepo::exists(pool, car_id).await? {
            errors.add("car_id", messages::selected_invalid("car_id"));
        }
    }

    if let Some(driver_id) = draft.driver_id {
        if !DriverRepo::exists(pool, driver_id).await? {
            errors.add("driver_id", messages::selected_invalid("driver_id"));
        }
    }

    if let Some(passenger_ids) = &draft.passenger_ids {
        let existing = PassengerRepo::existing_ids(pool, passenger_ids).await?;
        for (index, id) in passenger_ids.iter().enumerate() {
            if !existing.contains(id) {
                let field = format!("passengers.{index}");
                let message = messages::selected_invalid(&field);
                errors.add(field, message);
            }
        }
    }

    Ok(draft.finish(errors)?)
}
