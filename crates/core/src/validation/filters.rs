//! Validation of list query parameters.

use super::entities::{parse_passenger_type, TRANSFER_FINISH_TIME, TRANSFER_START_TIME};
use super::fields::{ordered_window, parse_datetime};
use super::{messages, FieldErrors};
use crate::availability::TimeWindow;
use crate::pagination::Page;
use crate::passenger_type::PassengerType;

/// Resolved listing parameters for cars and drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub page: Page,
    /// When set, only entities with no transfer overlapping this window are listed.
    pub window: Option<TimeWindow>,
    pub search: Option<String>,
}

impl AvailabilityQuery {
    pub fn resolve(
        per_page: Option<&str>,
        current_page: Option<&str>,
        transfer_start_time: Option<&str>,
        transfer_finish_time: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = errors.absorb(Page::resolve(per_page, current_page));
        let window = errors.absorb(window_filter(transfer_start_time, transfer_finish_time));
        errors.into_result()?;

        Ok(Self {
            page: page.unwrap_or_default(),
            window: window.flatten(),
            search: search_term(search),
        })
    }
}

/// Resolved listing parameters for passengers. The type filter is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerQuery {
    pub page: Page,
    pub passenger_type: PassengerType,
    pub search: Option<String>,
}

impl PassengerQuery {
    pub fn resolve(
        per_page: Option<&str>,
        current_page: Option<&str>,
        passenger_type: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let page = errors.absorb(Page::resolve(per_page, current_page));
        let passenger_type = parse_passenger_type(passenger_type, &mut errors);
        // A missing or unknown type has already been recorded in `errors`.
        let Some(passenger_type) = passenger_type else {
            return Err(errors);
        };
        errors.into_result()?;

        Ok(Self {
            page: page.unwrap_or_default(),
            passenger_type,
            search: search_term(search),
        })
    }
}

/// Optional availability window. Both bounds or neither must be given.
pub fn window_filter(
    start: Option<&str>,
    finish: Option<&str>,
) -> Result<Option<TimeWindow>, FieldErrors> {
    let start = non_blank(start);
    let finish = non_blank(finish);
    let mut errors = FieldErrors::new();

    let (start, finish) = match (start, finish) {
        (None, None) => return Ok(None),
        (Some(_), None) => {
            errors.add(
                TRANSFER_FINISH_TIME,
                messages::required_with(TRANSFER_FINISH_TIME, TRANSFER_START_TIME),
            );
            (start, None)
        }
        (None, Some(_)) => {
            errors.add(
                TRANSFER_START_TIME,
                messages::required_with(TRANSFER_START_TIME, TRANSFER_FINISH_TIME),
            );
            (None, finish)
        }
        (Some(_), Some(_)) => (start, finish),
    };

    let start = start.and_then(|s| parse_datetime(s, TRANSFER_START_TIME, &mut errors));
    let finish = finish.and_then(|s| parse_datetime(s, TRANSFER_FINISH_TIME, &mut errors));
    let window = ordered_window(
        start,
        finish,
        (TRANSFER_START_TIME, TRANSFER_FINISH_TIME),
        &mut errors,
    );

    errors.into_result()?;
    Ok(window)
}

/// Trimmed, non-empty free-text search term.
pub fn search_term(raw: Option<&str>) -> Option<String> {
    non_blank(raw).map(str::to_string)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
