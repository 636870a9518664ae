//! Paging and date filtering for record tables.
//!
//! Record lists (goals, incomes, expenses) are shown a page at a time and
//! narrowed to a date range chosen with the range picker. Nothing here knows
//! how rows are rendered; it only decides which rows are visible.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::models::NewGoal;

/// A row that can be filtered by date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for NewGoal {
    fn date(&self) -> NaiveDate {
        self.start_date
    }
}

/// Rows whose date falls inside `range`, in their original order.
pub fn filter_by_range<'a, T: Dated>(
    rows: &'a [T],
    range: &DateRange,
) -> Vec<&'a T> {
    rows.iter().filter(|row| range.contains(row.date())).collect()
}

/// Page sizes offered by the table footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum RowsPerPage {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl RowsPerPage {
    pub const ALL: [RowsPerPage; 4] = [
        RowsPerPage::Ten,
        RowsPerPage::TwentyFive,
        RowsPerPage::Fifty,
        RowsPerPage::Hundred,
    ];

    pub fn get(&self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|rows| rows.get() == count)
    }
}

impl From<RowsPerPage> for usize {
    fn from(rows: RowsPerPage) -> Self {
        rows.get()
    }
}

impl TryFrom<usize> for RowsPerPage {
    type Error = String;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::from_count(count)
            .ok_or_else(|| format!("rows per page must be 10, 25, 50 or 100, got {count}"))
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} linhas", self.get())
    }
}

/// One page of rows plus the figures shown in the table footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    /// 1-based index of the first visible row, 0 when there are none.
    pub first_row: usize,
    /// 1-based index of the last visible row, 0 when there are none.
    pub last_row: usize,
    pub total_rows: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// "Mostrando 1 até 10 de 23 registros"
    pub fn summary(&self) -> String {
        format!(
            "Mostrando {} até {} de {} registros",
            self.first_row, self.last_row, self.total_rows
        )
    }

    /// "Página 1 de 3"
    pub fn position(&self) -> String {
        format!("Página {} de {}", self.number, self.total_pages)
    }
}

/// Current page and page size of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    rows_per_page: RowsPerPage,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(RowsPerPage::default())
    }
}

impl Pagination {
    pub fn new(rows_per_page: RowsPerPage) -> Self {
        Self {
            rows_per_page,
            current_page: 1,
        }
    }

    pub fn rows_per_page(&self) -> RowsPerPage {
        self.rows_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changing the page size returns to the first page.
    pub fn set_rows_per_page(
        &mut self,
        rows_per_page: RowsPerPage,
    ) {
        self.rows_per_page = rows_per_page;
        self.current_page = 1;
    }

    /// Number of pages for `total_rows`; an empty table still has one page.
    pub fn total_pages(
        &self,
        total_rows: usize,
    ) -> usize {
        total_rows.div_ceil(self.rows_per_page.get()).max(1)
    }

    /// Jumps to `page`, clamped to `[1, total_pages]`.
    pub fn go_to(
        &mut self,
        page: usize,
        total_rows: usize,
    ) {
        self.current_page = page.clamp(1, self.total_pages(total_rows));
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn next(
        &mut self,
        total_rows: usize,
    ) {
        self.current_page = (self.current_page + 1).min(self.total_pages(total_rows));
    }

    /// Slices `rows` to the current page.
    ///
    /// If rows were removed since the page was chosen, the last existing page
    /// is shown instead.
    pub fn page<'a, T>(
        &self,
        rows: &'a [T],
    ) -> Page<'a, T> {
        let total_rows = rows.len();
        let total_pages = self.total_pages(total_rows);
        let number = self.current_page.min(total_pages);
        let per_page = self.rows_per_page.get();

        let start = ((number - 1) * per_page).min(total_rows);
        let end = (start + per_page).min(total_rows);

        let (first_row, last_row) = if start == end {
            (0, 0)
        } else {
            (start + 1, end)
        };

        Page {
            rows: &rows[start..end],
            number,
            total_pages,
            first_row,
            last_row,
            total_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Entry(NaiveDate);

    impl Dated for Entry {
        fn date(&self) -> NaiveDate {
            self.0
        }
    }

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows(count: usize) -> Vec<usize> {
        (1..=count).collect()
    }

    // =========================================================================
    // filter_by_range
    // =========================================================================

    #[test]
    fn filter_keeps_rows_inside_inclusive_range() {
        let entries = vec![
            Entry(date(2024, 5, 31)),
            Entry(date(2024, 6, 1)),
            Entry(date(2024, 6, 15)),
            Entry(date(2024, 6, 30)),
            Entry(date(2024, 7, 1)),
        ];
        let range = DateRange::between(date(2024, 6, 1), date(2024, 6, 30));

        let kept: Vec<_> = filter_by_range(&entries, &range)
            .into_iter()
            .map(|e| e.0)
            .collect();

        assert_eq!(kept, vec![date(2024, 6, 1), date(2024, 6, 15), date(2024, 6, 30)]);
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    #[test]
    fn twenty_three_rows_make_three_pages_of_ten() {
        let data = rows(23);
        let mut pagination = Pagination::default();

        pagination.go_to(3, data.len());
        let page = pagination.page(&data);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows, &[21, 22, 23]);
        assert_eq!(page.summary(), "Mostrando 21 até 23 de 23 registros");
        assert_eq!(page.position(), "Página 3 de 3");
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let data: Vec<usize> = Vec::new();
        let page = Pagination::default().page(&data);

        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.first_row, 0);
        assert_eq!(page.last_row, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn previous_and_next_are_clamped() {
        let data = rows(15);
        let mut pagination = Pagination::default();

        pagination.previous();
        assert_eq!(pagination.current_page(), 1);

        pagination.next(data.len());
        pagination.next(data.len());
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn changing_page_size_returns_to_first_page() {
        let data = rows(60);
        let mut pagination = Pagination::default();
        pagination.go_to(4, data.len());

        pagination.set_rows_per_page(RowsPerPage::TwentyFive);

        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.total_pages(data.len()), 3);
    }

    #[test]
    fn stale_page_falls_back_to_last_page() {
        let mut pagination = Pagination::default();
        pagination.go_to(5, 50);

        let shrunk = rows(12);
        let page = pagination.page(&shrunk);

        assert_eq!(page.number, 2);
        assert_eq!(page.rows, &[11, 12]);
    }

    #[test]
    fn rows_per_page_only_accepts_offered_sizes() {
        assert_eq!(RowsPerPage::try_from(50), Ok(RowsPerPage::Fifty));
        assert!(RowsPerPage::try_from(20).is_err());
        assert_eq!(RowsPerPage::Hundred.to_string(), "100 linhas");
    }
}
