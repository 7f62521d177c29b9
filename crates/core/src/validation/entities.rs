//! Per-entity validation of create/update payloads.
//!
//! A draft is built from the raw JSON object by running every shape and
//! format rule. The API layer then adds the database-backed rules for the
//! fields the draft managed to read, and finally calls `finish` to obtain a
//! typed input or the complete set of failures.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use validator::Validate;

use super::fields::{
    ordered_window, required_datetime, required_id, required_id_list, required_string,
};
use super::{messages, FieldErrors};
use crate::availability::TimeWindow;
use crate::error::CoreError;
use crate::passenger_type::PassengerType;
use crate::types::DbId;

/// Two digits, one or more capital letters, three or more digits (`34ABC123`).
pub static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[A-Z]+[0-9]{3,}$").expect("valid plate pattern"));

/// Eleven-digit national id.
pub static TC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("valid national id pattern"));

/// `+90` country code followed by ten digits.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+90[0-9]{10}$").expect("valid phone pattern"));

pub const TRANSFER_START_TIME: &str = "transfer_start_time";
pub const TRANSFER_FINISH_TIME: &str = "transfer_finish_time";

fn incomplete(entity: &str) -> CoreError {
    CoreError::Internal(format!("{entity} draft incomplete without validation errors"))
}

// ---------------------------------------------------------------------------
// Car
// ---------------------------------------------------------------------------

/// Validated car fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarInput {
    pub plate: String,
    pub model: String,
}

#[derive(Debug, Clone, Validate)]
pub struct CarDraft {
    #[validate(regex(path = *PLATE_RE, message = "The plate format is invalid."))]
    pub plate: Option<String>,
    pub model: Option<String>,
}

impl CarDraft {
    pub fn from_raw(raw: &Map<String, Value>) -> (Self, FieldErrors) {
        let mut errors = FieldErrors::new();
        let draft = Self {
            plate: required_string(raw, "plate", &mut errors),
            model: required_string(raw, "model", &mut errors),
        };
        if let Err(e) = draft.validate() {
            errors.extend_from(&e);
        }
        (draft, errors)
    }

    pub fn finish(self, errors: FieldErrors) -> Result<CarInput, CoreError> {
        errors.into_result()?;
        match (self.plate, self.model) {
            (Some(plate), Some(model)) => Ok(CarInput { plate, model }),
            _ => Err(incomplete("Car")),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInput {
    pub full_name: String,
    /// National id.
    pub tc: String,
}

#[derive(Debug, Clone, Validate)]
pub struct DriverDraft {
    pub full_name: Option<String>,
    #[validate(regex(path = *TC_RE, message = "The tc format is invalid."))]
    pub tc: Option<String>,
}

impl DriverDraft {
    pub fn from_raw(raw: &Map<String, Value>) -> (Self, FieldErrors) {
        let mut errors = FieldErrors::new();
        let draft = Self {
            full_name: required_string(raw, "full_name", &mut errors),
            tc: required_string(raw, "tc", &mut errors),
        };
        if let Err(e) = draft.validate() {
            errors.extend_from(&e);
        }
        (draft, errors)
    }

    pub fn finish(self, errors: FieldErrors) -> Result<DriverInput, CoreError> {
        errors.into_result()?;
        match (self.full_name, self.tc) {
            (Some(full_name), Some(tc)) => Ok(DriverInput { full_name, tc }),
            _ => Err(incomplete("Driver")),
        }
    }
}

// ---------------------------------------------------------------------------
// Passenger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerInput {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub passenger_type: PassengerType,
}

#[derive(Debug, Clone, Validate)]
pub struct PassengerDraft {
    #[validate(length(min = 3, message = "The name must be at least 3 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 3, message = "The surname must be at least 3 characters."))]
    pub surname: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "The phone format is invalid."))]
    pub phone: Option<String>,
    pub passenger_type: Option<PassengerType>,
}

impl PassengerDraft {
    pub fn from_raw(raw: &Map<String, Value>) -> (Self, FieldErrors) {
        let mut errors = FieldErrors::new();
        let draft = Self {
            name: required_string(raw, "name", &mut errors),
            surname: required_string(raw, "surname", &mut errors),
            phone: required_string(raw, "phone", &mut errors),
            passenger_type: passenger_type(raw, &mut errors),
        };
        if let Err(e) = draft.validate() {
            errors.extend_from(&e);
        }
        (draft, errors)
    }

    pub fn finish(self, errors: FieldErrors) -> Result<PassengerInput, CoreError> {
        errors.into_result()?;
        match (self.name, self.surname, self.phone, self.passenger_type) {
            (Some(name), Some(surname), Some(phone), Some(passenger_type)) => Ok(PassengerInput {
                name,
                surname,
                phone,
                passenger_type,
            }),
            _ => Err(incomplete("Passenger")),
        }
    }
}

/// Parse a required `passenger_type` value against the closed set.
pub fn parse_passenger_type(raw: Option<&str>, errors: &mut FieldErrors) -> Option<PassengerType> {
    const FIELD: &str = "passenger_type";
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        errors.add(FIELD, messages::required(FIELD));
        return None;
    };
    match text.parse::<PassengerType>() {
        Ok(t) => Some(t),
        Err(_) => {
            errors.add(FIELD, messages::selected_invalid(FIELD));
            None
        }
    }
}

fn passenger_type(raw: &Map<String, Value>, errors: &mut FieldErrors) -> Option<PassengerType> {
    match raw.get("passenger_type") {
        Some(Value::String(s)) => parse_passenger_type(Some(s), errors),
        None | Some(Value::Null) => parse_passenger_type(None, errors),
        Some(_) => {
            errors.add("passenger_type", messages::string("passenger_type"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Validated transfer fields plus the full passenger link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInput {
    pub car_id: DbId,
    pub driver_id: DbId,
    pub window: TimeWindow,
    pub transfer_start_place: String,
    /// One link row is written per entry, in order, duplicates included.
    pub passenger_ids: Vec<DbId>,
}

#[derive(Debug, Clone)]
pub struct TransferDraft {
    pub car_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub window: Option<TimeWindow>,
    pub transfer_start_place: Option<String>,
    pub passenger_ids: Option<Vec<DbId>>,
}

impl TransferDraft {
    pub fn from_raw(raw: &Map<String, Value>) -> (Self, FieldErrors) {
        let mut errors = FieldErrors::new();

        let passenger_ids = required_id_list(raw, "passengers", &mut errors);
        let car_id = required_id(raw, "car_id", &mut errors);
        let driver_id = required_id(raw, "driver_id", &mut errors);
        let start = required_datetime(raw, TRANSFER_START_TIME, &mut errors);
        let finish = required_datetime(raw, TRANSFER_FINISH_TIME, &mut errors);
        let window = ordered_window(
            start,
            finish,
            (TRANSFER_START_TIME, TRANSFER_FINISH_TIME),
            &mut errors,
        );
        let transfer_start_place = required_string(raw, "transfer_start_place", &mut errors);

        let draft = Self {
            car_id,
            driver_id,
            window,
            transfer_start_place,
            passenger_ids,
        };
        (draft, errors)
    }

    pub fn finish(self, errors: FieldErrors) -> Result<TransferInput, CoreError> {
        errors.into_result()?;
        match (
            self.car_id,
            self.driver_id,
            self.window,
            self.transfer_start_place,
            self.passenger_ids,
        ) {
            (
                Some(car_id),
                Some(driver_id),
                Some(window),
                Some(transfer_start_place),
                Some(passenger_ids),
            ) => Ok(TransferInput {
                car_id,
                driver_id,
                window,
                transfer_start_place,
                passenger_ids,
            }),
            _ => Err(incomplete("Transfer")),
        }
    }
}
