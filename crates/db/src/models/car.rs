//! Car entity model.

use serde::Serialize;
use sqlx::FromRow;
use transferhub_core::availability::TimeWindow;
use transferhub_core::types::{DbId, Timestamp};

/// A row from the `cars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Car {
    pub id: DbId,
    pub plate: String,
    pub model: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for listing cars.
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    /// Only cars with no transfer overlapping this window.
    pub available_between: Option<TimeWindow>,
    /// Substring match against plate or model.
    pub search: Option<String>,
}
