//! Route definitions for transfers.

use axum::routing::get;
use axum::Router;

use crate::handlers::transfer;
use crate::state::AppState;

/// Routes mounted at `/transfers`.
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
        .route("/", get(transfer::list).post(transfer::create))
        .route(
            "/{id}",
            get(transfer::get_by_id)
                .put(transfer::update)
                .patch(transfer::update)
                .delete(transfer::delete),
        )
}
