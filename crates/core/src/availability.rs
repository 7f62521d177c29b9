//! Availability of cars and drivers over a requested time window.
//!
//! An entity is busy during a window when at least one of its transfers
//! overlaps it. Bounds are inclusive on both sides: a transfer finishing at
//! exactly the moment the requested window starts still counts as a clash.
//!
//! Availability is only consulted when listing cars and drivers. Creating or
//! replacing a transfer never checks it, so double-booking is possible.

use crate::types::WindowTime;

/// Which side of a transfer an availability query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Car,
    Driver,
}

impl EntityKind {
    /// Foreign-key column on `transfers` that points at this entity.
    pub fn transfer_column(self) -> &'static str {
        match self {
            EntityKind::Car => "car_id",
            EntityKind::Driver => "driver_id",
        }
    }
}

/// A closed `[start, finish]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: WindowTime,
    pub finish: WindowTime,
}

impl TimeWindow {
    pub fn new(start: WindowTime, finish: WindowTime) -> Self {
        Self { start, finish }
    }

    /// Whether the window is well formed (start strictly before finish).
    pub fn is_ordered(&self) -> bool {
        self.start < self.finish
    }

    /// Inclusive overlap: neither window ends strictly before the other begins.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start <= other.finish && self.finish >= other.start
    }
}

/// Whether an entity with the given booked windows is free for `requested`.
///
/// This is the in-memory form of the query the repositories run in SQL
/// (`start <= requested.finish AND finish >= requested.start`).
pub fn is_available<'a, I>(booked: I, requested: &TimeWindow) -> bool
where
    I: IntoIterator<Item = &'a TimeWindow>,
{
    !booked.into_iter().any(|w| w.overlaps(requested))
}
