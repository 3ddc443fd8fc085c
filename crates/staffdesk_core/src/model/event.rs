//! Absence/training event model and admission policy constants.
//!
//! # Responsibility
//! - Define the closed set of event categories and their storage mappings.
//! - Define the category conflict matrix as a static lookup table.
//! - Provide the inclusive date-range overlap predicate.
//!
//! # Invariants
//! - `date_end` must not be earlier than `date_start`; the event admission
//!   pipeline enforces this before any persistence.
//! - The conflict matrix is symmetric: `a` conflicts with `b` iff `b`
//!   conflicts with `a`.
//! - Category ids are stable and mirrored by the seeded `event_types` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::employee::EmployeeId;

/// Stable identifier for one employee event.
pub type EventId = Uuid;

/// Closed set of event categories.
///
/// Adding a category means extending this enum, its mappings, and one row
/// plus one column of [`CONFLICT_MATRIX`]; no admission logic changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Multi-day vacation leave.
    Leave,
    /// Compensatory day off; must fall on working days only.
    DayOff,
    /// Scheduled training; blocks termination while still in the future.
    Training,
}

/// All categories in matrix order.
pub const EVENT_KINDS: [EventKind; 3] = [EventKind::Leave, EventKind::DayOff, EventKind::Training];

/// Category pair exclusion table, indexed by [`EventKind::index`].
///
/// `true` means a proposed event of the row category may not overlap an
/// existing event of the column category. Same-category overlaps are always
/// allowed, as is the Leave/Training combination.
pub const CONFLICT_MATRIX: [[bool; 3]; 3] = [
    // existing:      Leave  DayOff Training
    /* Leave    */ [false, true, false],
    /* DayOff   */ [true, false, true],
    /* Training */ [false, true, false],
];

impl EventKind {
    /// Position of this category in [`CONFLICT_MATRIX`].
    pub fn index(self) -> usize {
        match self {
            Self::Leave => 0,
            Self::DayOff => 1,
            Self::Training => 2,
        }
    }

    /// Returns whether this category may not overlap `existing`.
    pub fn conflicts_with(self, existing: EventKind) -> bool {
        CONFLICT_MATRIX[self.index()][existing.index()]
    }

    /// Stable storage name used in SQL text columns.
    pub fn db_name(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::DayOff => "day_off",
            Self::Training => "training",
        }
    }

    /// Parses the stable storage name.
    pub fn parse_db_name(value: &str) -> Option<Self> {
        match value {
            "leave" => Some(Self::Leave),
            "day_off" => Some(Self::DayOff),
            "training" => Some(Self::Training),
            _ => None,
        }
    }

    /// Numeric category id matching the seeded `event_types` rows.
    pub fn category_id(self) -> i64 {
        match self {
            Self::Leave => 1,
            Self::DayOff => 2,
            Self::Training => 3,
        }
    }

    /// Reverse mapping from a persisted category id.
    pub fn from_category_id(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Leave),
            2 => Some(Self::DayOff),
            3 => Some(Self::Training),
            _ => None,
        }
    }

    /// Human-readable category name used in rejection reasons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::DayOff => "day off",
            Self::Training => "training",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive date-range overlap predicate.
///
/// An exact endpoint touch counts as overlap: a range ending on a date
/// overlaps another range beginning that same date.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_end >= b_start && a_start <= b_end
}

/// One absence/training event owned by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEvent {
    /// Stable event id.
    pub event_uuid: EventId,
    /// Owning employee.
    pub employee_uuid: EmployeeId,
    /// Event category.
    pub kind: EventKind,
    /// Inclusive first calendar day.
    pub date_start: NaiveDate,
    /// Inclusive last calendar day.
    pub date_end: NaiveDate,
    /// Optional free-text reason.
    pub reason: Option<String>,
}

impl EmployeeEvent {
    /// Creates an event with a generated stable id.
    pub fn new(
        employee_uuid: EmployeeId,
        kind: EventKind,
        date_start: NaiveDate,
        date_end: NaiveDate,
        reason: Option<String>,
    ) -> Self {
        Self {
            event_uuid: Uuid::new_v4(),
            employee_uuid,
            kind,
            date_start,
            date_end,
            reason,
        }
    }

    /// Returns whether this event overlaps the inclusive range.
    pub fn overlaps(&self, date_start: NaiveDate, date_end: NaiveDate) -> bool {
        ranges_overlap(self.date_start, self.date_end, date_start, date_end)
    }
}
