//! Input validation.
//!
//! Validation never stops at the first failure: every rule runs and each
//! failing field collects its messages in a [`FieldErrors`] map, which the
//! API layer renders as `{ "field": ["message", ...] }`.
//!
//! Rules that need the database (`exists`, `unique`) live in the API crate
//! and append to the same map before a draft is turned into a typed input.

mod fields;
pub mod entities;
pub mod filters;
pub mod messages;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

pub use entities::{
    CarDraft, CarInput, DriverDraft, DriverInput, PassengerDraft, PassengerInput, TransferDraft,
    TransferInput,
};
pub use filters::{AvailabilityQuery, PassengerQuery};

/// Field name to list of failure messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Keep the value of a sub-validation, folding its failures into `self`.
    pub fn absorb<T>(&mut self, result: Result<T, FieldErrors>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.merge(errors);
                None
            }
        }
    }

    /// Fold in failures reported by a `#[derive(Validate)]` struct.
    pub fn extend_from(&mut self, errors: &validator::ValidationErrors) {
        for (field, list) in errors.field_errors() {
            let field = field.to_string();
            for error in list.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => messages::format(&field),
                };
                self.add(field.clone(), message);
            }
        }
    }

    /// `Ok(())` when nothing failed, otherwise the collected failures.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{} invalid field(s): {}", fields.len(), fields.join(", "))
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Validation(errors)
    }
}
