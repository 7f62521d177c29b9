//! Driver entity model.

use serde::Serialize;
use sqlx::FromRow;
use transferhub_core::availability::TimeWindow;
use transferhub_core::types::{DbId, Timestamp};

/// A row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Driver {
    pub id: DbId,
    pub full_name: String,
    /// National id, eleven digits.
    pub tc: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for listing drivers.
#[derive(Debug, Clone, Default)]
pub struct DriverFilter {
    pub available_between: Option<TimeWindow>,
    /// Substring match against full name or national id.
    pub search: Option<String>,
}
