pub mod car;
pub mod driver;
pub mod health;
pub mod passenger;
pub mod transfer;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cars                 list (availability + search filters), create
/// /cars/{id}            get, update, delete
///
/// /drivers              list (availability + search filters), create
/// /drivers/{id}         get, update, delete
///
/// /passengers           list (passenger_type required, search), create
/// /passengers/{id}      get, update, delete
///
/// /transfers            list, create (with passenger links)
/// /transfers/{id}       get, replace (with passenger links), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cars", car::router())
        .nest("/drivers", driver::router())
        .nest("/passengers", passenger::router())
        .nest("/transfers", transfer::router())
}
