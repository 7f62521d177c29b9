//! Extraction of individual fields from a raw JSON object.
//!
//! Each helper records its own failure in `errors` and returns `None` when
//! the field could not be read, so callers can keep validating other fields.

use serde_json::{Map, Value};

use super::{messages, FieldErrors};
use crate::availability::TimeWindow;
use crate::types::{DbId, WindowTime};
use crate::wire_time;

/// A present, non-blank string. Surrounding whitespace is trimmed.
pub(crate) fn required_string(
    raw: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match raw.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, messages::required(field));
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.add(field, messages::required(field));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.add(field, messages::string(field));
            None
        }
    }
}

/// A present integer id. Numeric strings (`"7"`) are accepted.
pub(crate) fn required_id(
    raw: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<DbId> {
    read_id(raw.get(field), field, errors)
}

/// A non-empty array of ids. Element failures are keyed `field.<index>`.
///
/// Returns the ids only when every element was readable; order and
/// duplicates are preserved.
pub(crate) fn required_id_list(
    raw: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Vec<DbId>> {
    let items = match raw.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, messages::required(field));
            return None;
        }
        Some(Value::Array(items)) if items.is_empty() => {
            errors.add(field, messages::required(field));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.add(field, messages::array(field));
            return None;
        }
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut complete = true;
    for (index, item) in items.iter().enumerate() {
        let key = format!("{field}.{index}");
        match read_id(Some(item), &key, errors) {
            Some(id) => ids.push(id),
            None => complete = false,
        }
    }

    complete.then_some(ids)
}

/// A present date-time in the wire format.
pub(crate) fn required_datetime(
    raw: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<WindowTime> {
    let text = required_string(raw, field, errors)?;
    parse_datetime(&text, field, errors)
}

pub(crate) fn parse_datetime(
    text: &str,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<WindowTime> {
    let parsed = wire_time::parse(text);
    if parsed.is_none() {
        errors.add(field, messages::date_format(field));
    }
    parsed
}

/// Combine two parsed bounds, requiring start strictly before finish.
///
/// An unordered pair reports against both fields.
pub(crate) fn ordered_window(
    start: Option<WindowTime>,
    finish: Option<WindowTime>,
    (start_field, finish_field): (&str, &str),
    errors: &mut FieldErrors,
) -> Option<TimeWindow> {
    let window = TimeWindow::new(start?, finish?);
    if window.is_ordered() {
        Some(window)
    } else {
        errors.add(start_field, messages::before(start_field, finish_field));
        errors.add(finish_field, messages::after(finish_field, start_field));
        None
    }
}

fn read_id(value: Option<&Value>, field: &str, errors: &mut FieldErrors) -> Option<DbId> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.add(field, messages::required(field));
            return None;
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.add(field, messages::required(field));
            return None;
        }
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<DbId>().ok(),
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.add(field, messages::integer(field));
    }
    parsed
}
