//! Failure message phrasing, one function per rule.

pub fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

pub fn required_with(field: &str, other: &str) -> String {
    format!("The {field} field is required when {other} is present.")
}

pub fn string(field: &str) -> String {
    format!("The {field} must be a string.")
}

pub fn integer(field: &str) -> String {
    format!("The {field} must be an integer.")
}

pub fn array(field: &str) -> String {
    format!("The {field} must be an array.")
}

pub fn format(field: &str) -> String {
    format!("The {field} format is invalid.")
}

pub fn date_format(field: &str) -> String {
    format!("The {field} does not match the format d.m.Y H:i:s.")
}

pub fn before(field: &str, other: &str) -> String {
    format!("The {field} must be a date before {other}.")
}

pub fn after(field: &str, other: &str) -> String {
    format!("The {field} must be a date after {other}.")
}

/// Referenced id does not exist, or an enumerated value is unknown.
pub fn selected_invalid(field: &str) -> String {
    format!("The selected {field} is invalid.")
}

pub fn taken(field: &str) -> String {
    format!("The {field} has already been taken.")
}
