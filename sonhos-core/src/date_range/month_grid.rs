//! Calendar grid for one displayed month.
//!
//! The grid is always six full weeks (42 cells) so the picker never changes
//! height between months. It starts on the configured first day of the week
//! on or before the 1st and simply continues day by day to fill the tail.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::weekday::weekday_name;

pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Months::new(1) - Days::new(1)
}

/// The `week_start` weekday on or before `date`.
pub fn start_of_week(
    date: NaiveDate,
    week_start: Weekday,
) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7;
    date - Days::new(u64::from(offset))
}

pub fn same_month(
    a: NaiveDate,
    b: NaiveDate,
) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Portuguese month name, lowercase as the locale writes it.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// One day on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// Cells from the neighbouring months are shown but cannot be picked.
    pub in_displayed_month: bool,
    /// Soft highlight: inside the provisional range and in the displayed month.
    pub in_range: bool,
    /// Strong highlight: one of the two range endpoints.
    pub selected: bool,
}

impl GridCell {
    pub fn is_selectable(&self) -> bool {
        self.in_displayed_month
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: NaiveDate,
    week_start: Weekday,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Lays out the month containing `month`.
    ///
    /// `highlight` is the provisional range as stored by the picker; its
    /// endpoints may come in either order.
    pub fn new(
        month: NaiveDate,
        week_start: Weekday,
        highlight: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let month = first_of_month(month);
        let first_cell = start_of_week(month, week_start);

        let cells = first_cell
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| {
                let in_displayed_month = same_month(date, month);
                let (in_range, selected) = match highlight {
                    Some((a, b)) => (
                        in_displayed_month && a.min(b) <= date && date <= a.max(b),
                        date == a || date == b,
                    ),
                    None => (false, false),
                };
                GridCell {
                    date,
                    in_displayed_month,
                    in_range,
                    selected,
                }
            })
            .collect();

        Self {
            month,
            week_start,
            cells,
        }
    }

    /// First day of the displayed month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// The grid split into its six rows.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(
        &self,
        date: NaiveDate,
    ) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    /// Column headers ("Dom", "Seg", ...) rotated to the week start.
    pub fn header_labels(&self) -> [&'static str; 7] {
        let mut day = self.week_start;
        std::array::from_fn(|_| {
            let label = weekday_name(day).short;
            day = day.succ();
            label
        })
    }

    /// Caption such as "junho 2024".
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month.month()), self.month.year())
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
    fn june_2024_has_42_cells_starting_on_sunday_before_the_first() {
        let grid = MonthGrid::new(date(2024, 6, 15), Weekday::Sun, None);

        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert_eq!(grid.cells()[0].date, date(2024, 5, 26));
        assert_eq!(grid.cells()[41].date, date(2024, 7, 6));
        assert_eq!(grid.month(), date(2024, 6, 1));
    }

    #[test]
    fn every_month_of_a_year_has_42_consecutive_cells() {
        for month in 1..=12 {
            let grid = MonthGrid::new(date(2023, month, 1), Weekday::Sun, None);
            let cells = grid.cells();

            assert_eq!(cells.len(), GRID_CELLS);
            for pair in cells.windows(2) {
                assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
            }
            assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn month_starting_on_week_start_has_no_leading_padding() {
        // September 2024 starts on a Sunday.
        let grid = MonthGrid::new(date(2024, 9, 1), Weekday::Sun, None);

        assert_eq!(grid.cells()[0].date, date(2024, 9, 1));
        assert!(grid.cells()[0].in_displayed_month);
    }

    #[test]
    fn monday_week_start_shifts_the_grid() {
        let grid = MonthGrid::new(date(2024, 6, 1), Weekday::Mon, None);

        assert_eq!(grid.cells()[0].date, date(2024, 5, 27));
        assert_eq!(
            grid.header_labels(),
            ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"]
        );
    }

    #[test]
    fn neighbouring_month_cells_are_not_selectable() {
        let grid = MonthGrid::new(date(2024, 6, 1), Weekday::Sun, None);
        let selectable = grid.cells().iter().filter(|c| c.is_selectable()).count();

        assert_eq!(selectable, 30);
        assert!(!grid.cell(date(2024, 5, 31)).unwrap().is_selectable());
        assert!(!grid.cell(date(2024, 7, 1)).unwrap().is_selectable());
    }

    #[test]
    fn in_range_excludes_cells_outside_the_displayed_month() {
        let grid = MonthGrid::new(
            date(2024, 6, 1),
            Weekday::Sun,
            Some((date(2024, 5, 20), date(2024, 7, 10))),
        );

        let may_cell = grid.cell(date(2024, 5, 30)).unwrap();
        let june_cell = grid.cell(date(2024, 6, 15)).unwrap();

        assert!(!may_cell.in_range);
        assert!(june_cell.in_range);
    }

    #[test]
    fn endpoints_are_selected_even_outside_the_month() {
        let grid = MonthGrid::new(
            date(2024, 6, 1),
            Weekday::Sun,
            Some((date(2024, 5, 28), date(2024, 6, 3))),
        );

        let selected: Vec<_> = grid
            .cells()
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.date)
            .collect();

        assert_eq!(selected, vec![date(2024, 5, 28), date(2024, 6, 3)]);
        assert!(!grid.cell(date(2024, 5, 28)).unwrap().in_range);
    }

    #[test]
    fn inverted_highlight_still_marks_the_days_between() {
        let grid = MonthGrid::new(
            date(2024, 6, 1),
            Weekday::Sun,
            Some((date(2024, 6, 20), date(2024, 6, 10))),
        );

        assert!(grid.cell(date(2024, 6, 15)).unwrap().in_range);
        assert!(!grid.cell(date(2024, 6, 21)).unwrap().in_range);
    }

    #[test]
    fn weeks_yields_six_rows_of_seven() {
        let grid = MonthGrid::new(date(2024, 2, 1), Weekday::Sun, None);

        let rows: Vec<_> = grid.weeks().collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.len() == 7));
    }

    #[test]
    fn title_uses_portuguese_month_name() {
        let grid = MonthGrid::new(date(2024, 3, 9), Weekday::Sun, None);

        assert_eq!(grid.title(), "março 2024");
    }

    #[test]
    fn month_helpers_handle_boundaries() {
        assert_eq!(first_of_month(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(last_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 12, 5)), date(2023, 12, 31));
        assert_eq!(start_of_week(date(2024, 6, 1), Weekday::Sun), date(2024, 5, 26));
        assert_eq!(start_of_week(date(2024, 6, 2), Weekday::Sun), date(2024, 6, 2));
    }
}
