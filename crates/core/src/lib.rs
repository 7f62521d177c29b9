//! Domain logic for the transfer logistics service.
//!
//! Nothing in this crate touches the database: it holds the shared type
//! aliases, the error taxonomy, input validation, the availability overlap
//! rule and wire formatting helpers used by the `db` and `api` crates.

pub mod availability;
pub mod error;
pub mod pagination;
pub mod passenger_type;
pub mod types;
pub mod validation;
pub mod wire_time;
