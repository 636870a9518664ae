use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A closed interval of calendar dates.
///
/// Unlike [`crate::DateRange`], a span is not normalized: when `end` precedes
/// `start` it is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self { start, end }
    }

    /// Builds a span only when both endpoints are known.
    pub fn from_endpoints(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days in the span, both endpoints included.
    pub fn len_days(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as u64 + 1
        }
    }

    /// Every date from `start` to `end` inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days()).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}
