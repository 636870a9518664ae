mod date_span;
mod goal;
pub mod weekday;

pub use date_span::DateSpan;
pub use goal::{Goal, GoalStatus, NewGoal};
pub use weekday::{WEEKDAY_NAMES, WeekdayName, WeekdayParseError, WeekdaySet};
