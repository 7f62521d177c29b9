//! Route definitions for cars.

use axum::routing::get;
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Routes mounted at `/cars`.
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
        .route("/", get(car::list).post(car::create))
        .route(
            "/{id}",
            get(car::get_by_id)
                .put(car::update)
                .patch(car::update)
                .delete(car::delete),
        )
}
