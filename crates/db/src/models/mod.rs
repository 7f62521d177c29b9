//! Row structs and list filters.
//!
//! Each submodule contains a `FromRow` struct matching its table. Write
//! inputs are the validated `*Input` types from `transferhub_core::validation`.

pub mod car;
pub mod driver;
pub mod passenger;
pub mod transfer;
