//! Weekday naming and weekday sets.
//!
//! Goals are entered with Portuguese weekday names ("Segunda", "Terça", ...)
//! but stored with canonical English identifiers ("Monday", "Tuesday", ...).
//! [`WEEKDAY_NAMES`] is the single fixed table that maps between the two,
//! plus the short labels used as calendar column headers.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a weekday name is not in [`WEEKDAY_NAMES`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised weekday name '{0}'")]
pub struct WeekdayParseError(pub String);

/// One row of the weekday name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayName {
    pub weekday: Weekday,
    /// Display name shown on the goal form.
    pub localized: &'static str,
    /// Column header on the calendar grid.
    pub short: &'static str,
    /// Identifier persisted with a goal.
    pub canonical: &'static str,
}

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [WeekdayName; 7] = [
    WeekdayName {
        weekday: Weekday::Sun,
        localized: "Domingo",
        short: "Dom",
        canonical: "Sunday",
    },
    WeekdayName {
        weekday: Weekday::Mon,
        localized: "Segunda",
        short: "Seg",
        canonical: "Monday",
    },
    WeekdayName {
        weekday: Weekday::Tue,
        localized: "Terça",
        short: "Ter",
        canonical: "Tuesday",
    },
    WeekdayName {
        weekday: Weekday::Wed,
        localized: "Quarta",
        short: "Qua",
        canonical: "Wednesday",
    },
    WeekdayName {
        weekday: Weekday::Thu,
        localized: "Quinta",
        short: "Qui",
        canonical: "Thursday",
    },
    WeekdayName {
        weekday: Weekday::Fri,
        localized: "Sexta",
        short: "Sex",
        canonical: "Friday",
    },
    WeekdayName {
        weekday: Weekday::Sat,
        localized: "Sábado",
        short: "Sáb",
        canonical: "Saturday",
    },
];

/// Returns the table row for `weekday`.
pub fn weekday_name(weekday: Weekday) -> &'static WeekdayName {
    &WEEKDAY_NAMES[weekday.num_days_from_sunday() as usize]
}

/// Looks up a weekday by its Portuguese display name.
pub fn from_localized(name: &str) -> Result<Weekday, WeekdayParseError> {
    WEEKDAY_NAMES
        .iter()
        .find(|row| row.localized == name)
        .map(|row| row.weekday)
        .ok_or_else(|| WeekdayParseError(name.to_string()))
}

/// Looks up a weekday by its canonical English identifier.
pub fn from_canonical(name: &str) -> Result<Weekday, WeekdayParseError> {
    WEEKDAY_NAMES
        .iter()
        .find(|row| row.canonical == name)
        .map(|row| row.weekday)
        .ok_or_else(|| WeekdayParseError(name.to_string()))
}

/// Accepts either a localized or a canonical name, ignoring case and
/// surrounding whitespace.
pub fn parse_weekday(name: &str) -> Result<Weekday, WeekdayParseError> {
    let trimmed = name.trim();
    let lowered = trimmed.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|row| {
            row.localized.to_lowercase() == lowered || row.canonical.to_lowercase() == lowered
        })
        .map(|row| row.weekday)
        .ok_or_else(|| WeekdayParseError(trimmed.to_string()))
}

/// A set of distinct weekdays.
///
/// Stored as a 7-bit mask indexed by days from Sunday, so duplicates are
/// impossible and iteration is always Sunday-first. Serializes as a list of
/// canonical names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Monday through Friday, the default for a new goal.
    pub fn workdays() -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .collect()
    }

    pub fn all() -> Self {
        WEEKDAY_NAMES.iter().map(|row| row.weekday).collect()
    }

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.num_days_from_sunday()
    }

    pub fn contains(
        &self,
        weekday: Weekday,
    ) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    /// Adds `weekday`. Returns `false` if it was already present.
    pub fn insert(
        &mut self,
        weekday: Weekday,
    ) -> bool {
        let present = self.contains(weekday);
        self.0 |= Self::bit(weekday);
        !present
    }

    /// Removes `weekday`. Returns `false` if it was not present.
    pub fn remove(
        &mut self,
        weekday: Weekday,
    ) -> bool {
        let present = self.contains(weekday);
        self.0 &= !Self::bit(weekday);
        present
    }

    /// Flips membership, like ticking a checkbox on the goal form.
    pub fn toggle(
        &mut self,
        weekday: Weekday,
    ) {
        self.0 ^= Self::bit(weekday);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAY_NAMES
            .iter()
            .map(|row| row.weekday)
            .filter(|day| self.contains(*day))
    }

    /// Canonical names of the members, Sunday first.
    pub fn canonical_names(&self) -> Vec<String> {
        self.iter()
            .map(|day| weekday_name(day).canonical.to_string())
            .collect()
    }

    /// Localized names of the members, Sunday first.
    pub fn localized_names(&self) -> Vec<String> {
        self.iter()
            .map(|day| weekday_name(day).localized.to_string())
            .collect()
    }

    /// Builds a set from localized or canonical names.
    pub fn parse_names<I, S>(names: I) -> Result<Self, WeekdayParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| parse_weekday(name.as_ref()))
            .collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<WeekdaySet> for Vec<String> {
    fn from(set: WeekdaySet) -> Self {
        set.canonical_names()
    }
}

impl TryFrom<Vec<String>> for WeekdaySet {
    type Error = WeekdayParseError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        WeekdaySet::parse_names(names)
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "—");
        }
        write!(f, "{}", self.localized_names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn table_is_sunday_first_and_indexed_by_weekday() {
        for (index, row) in WEEKDAY_NAMES.iter().enumerate() {
            assert_eq!(row.weekday.num_days_from_sunday() as usize, index);
        }
    }

    #[test]
    fn localized_and_canonical_lookups_are_inverse() {
        for row in WEEKDAY_NAMES {
            assert_eq!(from_localized(row.localized), Ok(row.weekday));
            assert_eq!(from_canonical(row.canonical), Ok(row.weekday));
            assert_eq!(weekday_name(row.weekday).canonical, row.canonical);
        }
    }

    #[test]
    fn from_localized_rejects_unknown_names() {
        assert_eq!(
            from_localized("Monday"),
            Err(WeekdayParseError("Monday".to_string()))
        );
    }

    #[test]
    fn parse_weekday_accepts_either_name_ignoring_case() {
        assert_eq!(parse_weekday("terça"), Ok(Weekday::Tue));
        assert_eq!(parse_weekday(" SATURDAY "), Ok(Weekday::Sat));
        assert!(parse_weekday("Feriado").is_err());
    }

    #[test]
    fn workdays_are_monday_to_friday() {
        let set = WeekdaySet::workdays();

        assert_eq!(set.len(), 5);
        assert!(!set.contains(Weekday::Sat));
        assert!(!set.contains(Weekday::Sun));
        assert_eq!(
            set.localized_names(),
            vec!["Segunda", "Terça", "Quarta", "Quinta", "Sexta"]
        );
    }

    #[test]
    fn insert_ignores_duplicates() {
        let mut set = WeekdaySet::EMPTY;

        assert!(set.insert(Weekday::Wed));
        assert!(!set.insert(Weekday::Wed));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = WeekdaySet::workdays();

        set.toggle(Weekday::Mon);
        assert!(!set.contains(Weekday::Mon));

        set.toggle(Weekday::Mon);
        assert!(set.contains(Weekday::Mon));
    }

    #[test]
    fn remove_reports_presence() {
        let mut set = WeekdaySet::workdays();

        assert!(set.remove(Weekday::Fri));
        assert!(!set.remove(Weekday::Fri));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn iteration_is_sunday_first_regardless_of_insertion_order() {
        let set: WeekdaySet = [Weekday::Sat, Weekday::Sun, Weekday::Wed]
            .into_iter()
            .collect();

        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Weekday::Sun, Weekday::Wed, Weekday::Sat]
        );
    }

    #[test]
    fn parse_names_mixes_localized_and_canonical() {
        let set = WeekdaySet::parse_names(["Segunda", "Friday"]).unwrap();

        assert_eq!(set.canonical_names(), vec!["Monday", "Friday"]);
    }

    #[test]
    fn all_contains_every_day() {
        assert_eq!(WeekdaySet::all().len(), 7);
        assert!(WeekdaySet::EMPTY.is_empty());
    }
}
