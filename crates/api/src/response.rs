//! Shared success envelope for API handlers.
//!
//! Every successful response has the shape
//! `{ "error": false, "data"?: {...}, "message"?: "..." }`. Failures use the
//! `{ "error": 1, ... }` shapes produced by [`crate::error::AppError`].

use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::data(CarEnvelope { car }).with_message("Car created successfully")))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            error: false,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Envelope with a message and no payload (used by deletes).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
