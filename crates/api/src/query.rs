//! Query parameter types for list endpoints.
//!
//! Values are kept as raw strings so malformed input is reported through the
//! validation envelope rather than rejected by the extractor.

use serde::Deserialize;

/// `?per_page=&current_page=`
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub per_page: Option<String>,
    pub current_page: Option<String>,
}

/// Car and driver listing: paging, optional availability window, optional search.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityListParams {
    pub per_page: Option<String>,
    pub current_page: Option<String>,
    pub transfer_start_time: Option<String>,
    pub transfer_finish_time: Option<String>,
    pub search: Option<String>,
}

/// Passenger listing: paging, mandatory type, optional search.
#[derive(Debug, Default, Deserialize)]
pub struct PassengerListParams {
    pub per_page: Option<String>,
    pub current_page: Option<String>,
    pub passenger_type: Option<String>,
    pub search: Option<String>,
}
