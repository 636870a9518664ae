//! Text views behind the `sonhos` subcommands.
//!
//! Each function takes already-loaded state and returns the text to print,
//! so the command layer only parses arguments and writes to stdout.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use sonhos_core::date_range::{PickerView, SelectionPhase};
use sonhos_core::table::{Pagination, filter_by_range};
use sonhos_core::{DateRange, DateRangeSelector, MonthGrid, NewGoal, PresetPeriod};
use tracing::debug;

use crate::models::GoalForm;
use crate::utils::amount_display;

fn br_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// The form followed by its savings plan.
///
/// The daily target is only printed once it is a positive amount.
pub fn render_plan(form: &GoalForm) -> String {
    let plan = form.savings_plan();
    let daily = if plan.is_displayable() {
        amount_display(plan.per_day_savings)
    } else {
        "—".to_string()
    };

    format!(
        "{form}\n\nDias qualificados: {}\nMeta diária:       {daily}\n",
        plan.qualifying_day_count
    )
}

/// Every preset with the range it resolves to on `today`.
pub fn render_presets(today: NaiveDate) -> String {
    let mut out = String::new();
    for preset in PresetPeriod::ALL {
        let range = preset.range(today);
        let _ = writeln!(
            out,
            "{:<16} {:<12} {} - {}",
            preset.label(),
            preset.id(),
            br_date(range.start),
            br_date(range.end)
        );
    }
    out
}

/// Six rows of seven days under the month title and weekday headers.
///
/// Cell markers: `[dd]` range endpoint, `(dd)` inside the range, ` dd ` a
/// day of the month, `·dd·` a day of a neighbouring month.
pub fn render_month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.title());

    let header: Vec<String> = grid
        .header_labels()
        .iter()
        .map(|label| format!("{label:^4}"))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let day = cell.date.format("%d");
                if cell.selected {
                    format!("[{day}]")
                } else if cell.in_range {
                    format!("({day})")
                } else if cell.in_displayed_month {
                    format!(" {day} ")
                } else {
                    format!("·{day}·")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", row.join(" ").trim_end());
    }
    out
}

/// What a scripted picker session ended with.
#[derive(Debug, Clone)]
pub struct PickOutcome {
    /// The range emitted by the picker, if a selection completed.
    pub committed: Option<DateRange>,
    /// The calendar as last displayed while the picker was open.
    pub grid: Option<MonthGrid>,
    /// Phase the picker was left in; `None` once it has closed.
    pub phase: Option<SelectionPhase>,
}

/// Pages the open picker until the month of `date` is displayed.
fn show_month_of(
    selector: &mut DateRangeSelector,
    date: NaiveDate,
) {
    let target = (date.year(), date.month());
    while let Some(shown) = selector.selection().map(|s| s.displayed_month) {
        let current = (shown.year(), shown.month());
        if current == target {
            break;
        }
        if current < target {
            selector.show_next_month();
        } else {
            selector.show_previous_month();
        }
    }
}

/// Drives a picker the way a user would: open it on `current`, switch to
/// the calendar, page to each clicked day and click it, then optionally
/// choose a preset.
///
/// Clicks after a range has been committed are ignored, as is a preset when
/// the clicks already closed the picker.
pub fn run_pick(
    selector: &mut DateRangeSelector,
    current: DateRange,
    clicks: &[NaiveDate],
    preset: Option<PresetPeriod>,
    today: NaiveDate,
) -> PickOutcome {
    selector.open(current);
    if !clicks.is_empty() && selector.view() == PickerView::Presets {
        selector.toggle_view();
    }

    let mut committed = None;
    let mut shown = selector.selection().map(|s| s.displayed_month);

    for &date in clicks {
        if !selector.is_open() {
            debug!(%date, "picker closed; ignoring click");
            continue;
        }
        show_month_of(selector, date);
        shown = selector.selection().map(|s| s.displayed_month);
        committed = selector.pick(date).or(committed);
    }

    if let Some(preset) = preset {
        if let Some(range) = selector.select_preset(preset, today) {
            committed = Some(range);
            shown = Some(range.start);
        }
    }

    let grid = match committed {
        _ if selector.is_open() => selector.month_grid(),
        Some(range) => Some(MonthGrid::new(
            shown.unwrap_or(range.start),
            selector.week_start(),
            Some((range.start, range.end)),
        )),
        None => None,
    };

    PickOutcome {
        committed,
        grid,
        phase: selector.phase(),
    }
}

/// Report for [`run_pick`]: the committed range or the pending prompt,
/// followed by the calendar.
pub fn render_pick(outcome: &PickOutcome) -> String {
    let mut out = String::new();
    match (outcome.committed, outcome.phase) {
        (Some(range), _) => {
            let _ = writeln!(
                out,
                "Período: {} - {}",
                br_date(range.start),
                br_date(range.end)
            );
        }
        (None, Some(SelectionPhase::Start)) => {
            let _ = writeln!(out, "Selecione a data inicial");
        }
        (None, Some(SelectionPhase::End)) => {
            let _ = writeln!(out, "Selecione a data final");
        }
        (None, None) => {
            let _ = writeln!(out, "Nenhum período selecionado");
        }
    }
    if let Some(grid) = &outcome.grid {
        out.push('\n');
        out.push_str(&render_month_grid(grid));
    }
    out
}

/// One page of goals, optionally narrowed to `range`, with the footer.
pub fn render_goal_table(
    goals: &[NewGoal],
    range: Option<&DateRange>,
    pagination: &Pagination,
) -> String {
    let visible: Vec<&NewGoal> = match range {
        Some(range) => filter_by_range(goals, range),
        None => goals.iter().collect(),
    };
    let page = pagination.page(&visible);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<12} {:<10} {:<10} {:>12} {:>12}  {}",
        "Descrição", "Importância", "Início", "Meta até", "Valor", "Meta diária", "Status"
    );

    if page.rows.is_empty() {
        let _ = writeln!(out, "Nenhum registro encontrado.");
    }
    for goal in page.rows {
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:<10} {:<10} {:>12} {:>12}  {}",
            goal.description,
            goal.importance,
            br_date(goal.start_date),
            br_date(goal.target_date),
            amount_display(goal.amount),
            amount_display(goal.initial_daily_goal),
            goal.status
        );
    }

    let _ = writeln!(
        out,
        "\n{}  ·  {}  ·  {}",
        page.summary(),
        page.position(),
        pagination.rows_per_page()
    );
    out
}
