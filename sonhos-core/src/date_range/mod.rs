//! Date range selection for filters and goal spans.
//!
//! The picker is modelled as [`DateRangeSelector`], an explicit state machine
//! driven by date picks and preset choices. [`MonthGrid`] describes the
//! calendar the picker displays and [`PresetPeriod`] the named shortcuts.

pub mod month_grid;
pub mod presets;
pub mod selector;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DateSpan;

pub use month_grid::{GRID_CELLS, GridCell, MonthGrid};
pub use presets::PresetPeriod;
pub use selector::{DateRangeSelector, PickerView, SelectionPhase, SelectionState};

/// A committed date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two dates in either order.
    pub fn between(
        a: NaiveDate,
        b: NaiveDate,
    ) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn to_span(&self) -> DateSpan {
        DateSpan::new(self.start, self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
