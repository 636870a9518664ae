pub mod calculations;
pub mod date_range;
pub mod models;
pub mod table;

pub use calculations::{SavingsPlan, SavingsPlanCalculator};
pub use date_range::{DateRange, DateRangeSelector, MonthGrid, PresetPeriod, SelectionPhase};
pub use models::*;
