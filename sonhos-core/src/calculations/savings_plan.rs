//! Daily savings plan for a goal.
//!
//! A goal says "save `amount` between `start` and `end`, putting money aside
//! only on these weekdays". The plan counts the qualifying days in the span
//! and splits the amount evenly across them.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use sonhos_core::{SavingsPlanCalculator, WeekdaySet};
//!
//! // Monday 3 June to Friday 7 June 2024
//! let plan = SavingsPlanCalculator::compute_from_input(
//!     "1.000,00",
//!     NaiveDate::from_ymd_opt(2024, 6, 3),
//!     NaiveDate::from_ymd_opt(2024, 6, 7),
//!     &WeekdaySet::workdays(),
//! );
//!
//! assert_eq!(plan.qualifying_day_count, 5);
//! assert_eq!(plan.per_day_savings, dec!(200.00));
//! ```

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{parse_locale_amount, round_half_up};
use crate::{DateSpan, WeekdaySet};

/// Result of a savings plan calculation.
///
/// Recomputed from scratch whenever an input changes; it carries no identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Days in the span whose weekday is selected.
    pub qualifying_day_count: u32,
    /// Amount to put aside on each qualifying day, unrounded.
    pub per_day_savings: Decimal,
}

impl SavingsPlan {
    pub const ZERO: SavingsPlan = SavingsPlan {
        qualifying_day_count: 0,
        per_day_savings: Decimal::ZERO,
    };

    /// Whether the plan is worth showing next to the goal form.
    pub fn is_displayable(&self) -> bool {
        self.per_day_savings > Decimal::ZERO
    }

    /// Per-day savings rounded to cents for display.
    pub fn per_day_rounded(&self) -> Decimal {
        round_half_up(self.per_day_savings)
    }
}

/// Calculator for goal savings plans.
///
/// Every entry point is total: missing or malformed inputs produce
/// [`SavingsPlan::ZERO`] rather than an error.
pub struct SavingsPlanCalculator;

impl SavingsPlanCalculator {
    /// Computes the plan from already-parsed inputs.
    ///
    /// Returns [`SavingsPlan::ZERO`] when the amount is unset, the span is
    /// missing or the weekday set is empty.
    pub fn compute(
        amount: Option<Decimal>,
        span: Option<DateSpan>,
        weekdays: &WeekdaySet,
    ) -> SavingsPlan {
        let (Some(amount), Some(span)) = (amount, span) else {
            return SavingsPlan::ZERO;
        };
        if weekdays.is_empty() {
            return SavingsPlan::ZERO;
        }

        let qualifying_day_count = Self::qualifying_days(&span, weekdays);
        let per_day_savings = Self::per_day_savings(amount, qualifying_day_count);

        debug!(
            amount = %amount,
            start = %span.start,
            end = %span.end,
            weekdays = %weekdays,
            qualifying_day_count,
            per_day_savings = %per_day_savings,
            "computed savings plan"
        );

        SavingsPlan {
            qualifying_day_count,
            per_day_savings,
        }
    }

    /// Computes the plan from raw form input.
    ///
    /// `amount` uses Brazilian separators (see
    /// [`parse_locale_amount`]); anything unparseable counts as unset.
    pub fn compute_from_input(
        amount: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        weekdays: &WeekdaySet,
    ) -> SavingsPlan {
        Self::compute(
            parse_locale_amount(amount),
            DateSpan::from_endpoints(start, end),
            weekdays,
        )
    }

    /// Counts dates in `span`, both endpoints included, that fall on a
    /// selected weekday. An inverted span has no days.
    pub fn qualifying_days(
        span: &DateSpan,
        weekdays: &WeekdaySet,
    ) -> u32 {
        let count = span
            .days()
            .filter(|day| weekdays.contains(day.weekday()))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn per_day_savings(
        amount: Decimal,
        qualifying_day_count: u32,
    ) -> Decimal {
        if qualifying_day_count == 0 {
            return Decimal::ZERO;
        }
        amount
            .checked_div(Decimal::from(qualifying_day_count))
            .unwrap_or(Decimal::ZERO)
    }
}
