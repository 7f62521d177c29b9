//! Passenger entity model.

use serde::Serialize;
use sqlx::FromRow;
use transferhub_core::passenger_type::PassengerType;
use transferhub_core::types::{DbId, Timestamp};

/// A row from the `passengers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Passenger {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    /// One of the [`PassengerType`] values; enforced by a CHECK constraint.
    pub passenger_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for listing passengers.
#[derive(Debug, Clone)]
pub struct PassengerFilter {
    pub passenger_type: PassengerType,
    /// Substring match against name, surname, phone or type.
    pub search: Option<String>,
}
