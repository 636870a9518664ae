use std::fmt;

use chrono::{Datelike, Days, NaiveDate};

use super::DateRange;
use super::month_grid::{first_of_month, last_of_month};

/// Named shortcut ranges offered next to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetPeriod {
    Today,
    Last7Days,
    Last14Days,
    CurrentMonth,
    Last90Days,
    YearToDate,
}

impl PresetPeriod {
    /// Presets in the order the picker lists them.
    pub const ALL: [PresetPeriod; 6] = [
        PresetPeriod::Today,
        PresetPeriod::Last7Days,
        PresetPeriod::Last14Days,
        PresetPeriod::CurrentMonth,
        PresetPeriod::Last90Days,
        PresetPeriod::YearToDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Hoje",
            Self::Last7Days => "Últimos 7 dias",
            Self::Last14Days => "Últimos 14 dias",
            Self::CurrentMonth => "Mês Atual",
            Self::Last90Days => "Últimos 90 dias",
            Self::YearToDate => "Este ano",
        }
    }

    /// Short identifier for command lines and config files.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7Days => "last-7-days",
            Self::Last14Days => "last-14-days",
            Self::CurrentMonth => "current-month",
            Self::Last90Days => "last-90-days",
            Self::YearToDate => "year-to-date",
        }
    }

    /// Matches either the identifier or the display label, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.id() == wanted || preset.label().to_lowercase() == wanted)
    }

    /// The range this preset denotes when evaluated on `today`.
    pub fn range(
        &self,
        today: NaiveDate,
    ) -> DateRange {
        let trailing = |days: u64| DateRange {
            start: today - Days::new(days - 1),
            end: today,
        };

        match self {
            Self::Today => DateRange::single(today),
            Self::Last7Days => trailing(7),
            Self::Last14Days => trailing(14),
            Self::CurrentMonth => DateRange {
                start: first_of_month(today),
                end: last_of_month(today),
            },
            Self::Last90Days => trailing(90),
            Self::YearToDate => DateRange {
                start: today - Days::new(u64::from(today.ordinal0())),
                end: today,
            },
        }
    }
}

impl fmt::Display for PresetPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last_seven_days_includes_today() {
        let range = PresetPeriod::Last7Days.range(date(2024, 6, 10));

        assert_eq!(range.start, date(2024, 6, 4));
        assert_eq!(range.end, date(2024, 6, 10));
    }

    #[test]
    fn every_preset_evaluated_mid_june() {
        let today = date(2024, 6, 10);
        let expected = [
            (date(2024, 6, 10), date(2024, 6, 10)),
            (date(2024, 6, 4), date(2024, 6, 10)),
            (date(2024, 5, 28), date(2024, 6, 10)),
            (date(2024, 6, 1), date(2024, 6, 30)),
            (date(2024, 3, 13), date(2024, 6, 10)),
            (date(2024, 1, 1), date(2024, 6, 10)),
        ];

        for (preset, (start, end)) in PresetPeriod::ALL.into_iter().zip(expected) {
            assert_eq!(preset.range(today), DateRange { start, end }, "{preset}");
        }
    }

    #[test]
    fn current_month_handles_leap_february() {
        let range = PresetPeriod::CurrentMonth.range(date(2024, 2, 14));

        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn year_to_date_on_new_years_day_is_a_single_day() {
        let today = date(2025, 1, 1);

        assert_eq!(PresetPeriod::YearToDate.range(today), DateRange::single(today));
    }

    #[test]
    fn trailing_presets_cross_year_boundary() {
        let range = PresetPeriod::Last14Days.range(date(2025, 1, 5));

        assert_eq!(range.start, date(2024, 12, 23));
    }

    #[test]
    fn every_preset_range_is_ordered() {
        let today = date(2024, 12, 31);
        for preset in PresetPeriod::ALL {
            let range = preset.range(today);
            assert!(range.start <= range.end, "{preset}");
        }
    }

    #[test]
    fn parse_accepts_id_or_label() {
        assert_eq!(PresetPeriod::parse("last-90-days"), Some(PresetPeriod::Last90Days));
        assert_eq!(PresetPeriod::parse("últimos 7 dias"), Some(PresetPeriod::Last7Days));
        assert_eq!(PresetPeriod::parse("Mês Atual"), Some(PresetPeriod::CurrentMonth));
        assert_eq!(PresetPeriod::parse("amanhã"), None);
    }
}
