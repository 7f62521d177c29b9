//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod car_repo;
pub mod driver_repo;
pub mod passenger_repo;
pub mod transfer_repo;

pub use car_repo::CarRepo;
pub use driver_repo::DriverRepo;
pub use passenger_repo::PassengerRepo;
pub use transfer_repo::TransferRepo;

use transferhub_core::availability::EntityKind;

/// SQL `EXISTS` clause that is true when the entity referenced by
/// `entity_ref` has a transfer overlapping `[$start, $finish]`.
///
/// Bounds are inclusive on both sides.
pub(crate) fn overlapping_transfer_exists(
    kind: EntityKind,
    entity_ref: &str,
    start_param: &str,
    finish_param: &str,
) -> String {
    let column = kind.transfer_column();
    format!(
        "EXISTS (SELECT 1 FROM transfers ot \
                 WHERE ot.{column} = {entity_ref} \
                   AND ot.transfer_start_time <= {finish_param} \
                   AND ot.transfer_finish_time >= {start_param})"
    )
}

/// Build an `ILIKE` pattern matching `term` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
