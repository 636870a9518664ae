//! Two-click date range picker.
//!
//! # States
//!
//! | State            | `phase()`                     | Leaves on                                  |
//! |------------------|-------------------------------|--------------------------------------------|
//! | Idle             | `None`                        | [`open`](DateRangeSelector::open)          |
//! | Selecting start  | `Some(SelectionPhase::Start)` | a pick → Selecting end; preset → Idle      |
//! | Selecting end    | `Some(SelectionPhase::End)`   | a pick → Idle (commit); preset → Idle      |
//!
//! A commit is returned as `Some(DateRange)` from the operation that caused
//! it, so the owner sees each completed selection exactly once. Closing the
//! picker any other way discards the provisional range.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use sonhos_core::{DateRange, DateRangeSelector};
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
//! let mut picker = DateRangeSelector::default();
//!
//! picker.open(DateRange::between(d(1), d(30)));
//! assert_eq!(picker.pick(d(20)), None);
//!
//! // Picking an earlier end date still commits an ordered range.
//! assert_eq!(picker.pick(d(5)), Some(DateRange::between(d(5), d(20))));
//! assert!(!picker.is_open());
//! ```

use chrono::{Months, NaiveDate, Weekday};
use tracing::debug;

use super::month_grid::{MonthGrid, first_of_month, same_month};
use super::{DateRange, PresetPeriod};

/// Which endpoint the next calendar pick sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Start,
    End,
}

/// Tab shown inside the open picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerView {
    #[default]
    Presets,
    Calendar,
}

/// Everything the picker tracks while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub phase: SelectionPhase,
    pub provisional_start: NaiveDate,
    pub provisional_end: NaiveDate,
    /// First day of the month shown on the calendar tab.
    pub displayed_month: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DateRangeSelector {
    week_start: Weekday,
    view: PickerView,
    selection: Option<SelectionState>,
}

impl Default for DateRangeSelector {
    /// Sunday-first weeks, as in the pt-BR locale.
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl DateRangeSelector {
    pub fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            view: PickerView::default(),
            selection: None,
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    /// `None` while idle.
    pub fn phase(&self) -> Option<SelectionPhase> {
        self.selection.as_ref().map(|s| s.phase)
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Provisional `(start, end)` as stored, if open.
    pub fn provisional(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.selection
            .as_ref()
            .map(|s| (s.provisional_start, s.provisional_end))
    }

    pub fn view(&self) -> PickerView {
        self.view
    }

    /// Opens the picker on the owner's current range.
    ///
    /// The provisional range is seeded from `current` and the calendar shows
    /// the month of `current.start`. Every opening starts in
    /// [`SelectionPhase::Start`]. Does nothing if already open.
    pub fn open(
        &mut self,
        current: DateRange,
    ) {
        if self.is_open() {
            return;
        }
        debug!(start = %current.start, end = %current.end, "opening date range picker");
        self.selection = Some(SelectionState {
            phase: SelectionPhase::Start,
            provisional_start: current.start,
            provisional_end: current.end,
            displayed_month: first_of_month(current.start),
        });
    }

    /// Closes the picker, discarding any half-made selection.
    pub fn close(&mut self) {
        if self.selection.take().is_some() {
            debug!("date range picker closed without commit");
        }
    }

    /// Opens when idle, closes when open (clicking the input field).
    pub fn toggle(
        &mut self,
        current: DateRange,
    ) {
        if self.is_open() {
            self.close();
        } else {
            self.open(current);
        }
    }

    /// Switches between the presets tab and the calendar tab.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            PickerView::Presets => PickerView::Calendar,
            PickerView::Calendar => PickerView::Presets,
        };
    }

    pub fn show_previous_month(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.displayed_month = selection.displayed_month - Months::new(1);
        }
    }

    pub fn show_next_month(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.displayed_month = selection.displayed_month + Months::new(1);
        }
    }

    /// Handles a click on a calendar day.
    ///
    /// The first pick sets both provisional endpoints to `date`. The second
    /// commits the range between the first pick and `date` in ascending
    /// order, closes the picker and returns the committed range.
    ///
    /// Picks while idle, or on a day outside the displayed month, are
    /// ignored.
    pub fn pick(
        &mut self,
        date: NaiveDate,
    ) -> Option<DateRange> {
        let selection = self.selection.as_mut()?;
        if !same_month(date, selection.displayed_month) {
            debug!(%date, "ignoring pick outside displayed month");
            return None;
        }

        match selection.phase {
            SelectionPhase::Start => {
                selection.provisional_start = date;
                selection.provisional_end = date;
                selection.phase = SelectionPhase::End;
                debug!(%date, "range start picked");
                None
            }
            SelectionPhase::End => {
                let range = DateRange::between(selection.provisional_start, date);
                selection.provisional_start = range.start;
                selection.provisional_end = range.end;
                Some(self.commit(range))
            }
        }
    }

    /// Commits a preset relative to `today` from either phase.
    pub fn select_preset(
        &mut self,
        preset: PresetPeriod,
        today: NaiveDate,
    ) -> Option<DateRange> {
        if !self.is_open() {
            return None;
        }
        debug!(preset = preset.id(), "preset selected");
        Some(self.commit(preset.range(today)))
    }

    /// The calendar for the displayed month with the provisional range
    /// highlighted, if open.
    pub fn month_grid(&self) -> Option<MonthGrid> {
        self.selection.as_ref().map(|s| {
            MonthGrid::new(
                s.displayed_month,
                self.week_start,
                Some((s.provisional_start, s.provisional_end)),
            )
        })
    }

    /// Hint shown above the calendar.
    pub fn prompt(&self) -> Option<&'static str> {
        self.phase().map(|phase| match phase {
            SelectionPhase::Start => "Selecione a data inicial",
            SelectionPhase::End => "Selecione a data final",
        })
    }

    fn commit(
        &mut self,
        range: DateRange,
    ) -> DateRange {
        debug!(start = %range.start, end = %range.end, "date range committed");
        self.selection = None;
        range
    }
}
