//! Savings calculations for goals.
//!
//! This module turns a goal's amount, date span and weekday selection into a
//! daily savings figure.

pub mod common;
pub mod savings_plan;

pub use savings_plan::{SavingsPlan, SavingsPlanCalculator};
