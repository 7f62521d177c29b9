//! Route definitions for passengers.

use axum::routing::get;
use axum::Router;

use crate::handlers::passenger;
use crate::state::AppState;

/// Routes mounted at `/passengers`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(passenger::list).post(passenger::create))
        .route(
            "/{id}",
            get(passenger::get_by_id)
                .put(passenger::update)
                .patch(passenger::update)
                .delete(passenger::delete),
        )
}
