//! CSV loader for goal drafts.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter.
//! Header names are case-sensitive.
//!
//! | Column        | Required | Type   | Notes                                              |
//! |---------------|----------|--------|----------------------------------------------------|
//! | `description` | yes      | string |                                                    |
//! | `importance`  | yes      | string |                                                    |
//! | `start_date`  | yes      | date   | `YYYY-MM-DD`                                       |
//! | `target_date` | yes      | date   | `YYYY-MM-DD`                                       |
//! | `amount`      | yes      | string | Brazilian separators, e.g. `10.000,00` (quote it)  |
//! | `workdays`    | no       | string | `;`-separated names, e.g. `Segunda;Quarta`         |
//! | `status`      | no       | string | `waiting`, `in_progress` or `completed`            |
//! | `image_url`   | no       | string |                                                    |
//!
//! Empty `workdays` falls back to the configured default set and empty
//! `status` to `waiting`. The amount is kept as typed; an unparseable amount
//! is not an error here, it just plans to zero.
//!
//! ### Example
//!
//! ```csv
//! description,importance,start_date,target_date,amount,workdays,status
//! Viagem,Alta,2024-12-01,2025-01-01,"10.000,00",Segunda;Terça;Quarta;Quinta;Sexta,waiting
//! Bicicleta,Média,2024-06-03,2024-06-28,"1.500,00",,
//! ```
use chrono::NaiveDate;
use serde::Deserialize;
use sonhos_core::{GoalStatus, WeekdaySet};
use tracing::debug;

use crate::models::GoalForm;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    description: String,
    importance: String,
    start_date: NaiveDate,
    target_date: NaiveDate,
    amount: String,
    workdays: Option<String>,
    status: Option<String>,
    image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, malformed date, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `workdays` cell named a day that is not in the weekday table.
    /// `row` is 1-based (header = row 0).
    #[error("unrecognised weekday '{name}' on row {row}")]
    InvalidWeekday { name: String, row: usize },

    /// A `status` cell contained an unknown status.
    #[error("unrecognised status '{status}' on row {row}")]
    InvalidStatus { status: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

/// Convert a single CSV row into a goal form.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
    default_workdays: WeekdaySet,
) -> Result<GoalForm, CsvLoadError> {
    let workdays = match non_empty(row.workdays) {
        Some(cell) => WeekdaySet::parse_names(
            cell.split(';').map(str::trim).filter(|name| !name.is_empty()),
        )
        .map_err(|e| CsvLoadError::InvalidWeekday {
            name: e.0,
            row: row_number,
        })?,
        None => default_workdays,
    };

    let status = match non_empty(row.status) {
        Some(cell) => GoalStatus::parse(&cell).ok_or(CsvLoadError::InvalidStatus {
            status: cell,
            row: row_number,
        })?,
        None => GoalStatus::default(),
    };

    Ok(GoalForm {
        description: row.description,
        importance: row.importance,
        start_date: Some(row.start_date),
        target_date: Some(row.target_date),
        amount: row.amount,
        workdays,
        status,
        image_url: non_empty(row.image_url).unwrap_or_default(),
    })
}

/// Parse CSV text and return one goal form per row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidWeekday] / [CsvLoadError::InvalidStatus] – if a
///   row names an unknown weekday or status.
pub fn load_from_str(
    input: &str,
    default_workdays: WeekdaySet,
) -> Result<Vec<GoalForm>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let forms = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1, default_workdays)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = forms.len(), "goal CSV parsed");
    Ok(forms)
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(
    path: &std::path::Path,
    default_workdays: WeekdaySet,
) -> Result<Vec<GoalForm>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents, default_workdays)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    const MINIMAL_CSV: &str = "\
description,importance,start_date,target_date,amount
Viagem,Alta,2024-12-01,2025-01-01,\"10.000,00\"
";

    const FULL_CSV: &str = "\
description,importance,start_date,target_date,amount,workdays,status,image_url
Carro,Média,2024-06-03,2024-06-07,\"1.000,00\",Segunda;Friday,in_progress,https://img/carro.png
";

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_minimal_csv_uses_defaults() {
        let forms = load_from_str(MINIMAL_CSV, WeekdaySet::workdays()).expect("should parse");

        assert_eq!(forms.len(), 1);
        let f = &forms[0];
        assert_eq!(f.description, "Viagem");
        assert_eq!(f.start_date, Some(date(2024, 12, 1)));
        assert_eq!(f.target_date, Some(date(2025, 1, 1)));
        assert_eq!(f.amount, "10.000,00");
        assert_eq!(f.workdays, WeekdaySet::workdays());
        assert_eq!(f.status, GoalStatus::Waiting);
        assert_eq!(f.image_url, "");
    }

    #[test]
    fn test_full_csv_all_fields_populated() {
        let forms = load_from_str(FULL_CSV, WeekdaySet::workdays()).expect("should parse");
        let f = &forms[0];

        assert_eq!(
            f.workdays.iter().collect::<Vec<_>>(),
            vec![Weekday::Mon, Weekday::Fri]
        );
        assert_eq!(f.status, GoalStatus::InProgress);
        assert_eq!(f.image_url, "https://img/carro.png");
        assert_eq!(f.savings_plan().qualifying_day_count, 2);
    }

    #[test]
    fn test_empty_workdays_cell_uses_configured_default() {
        let csv = "\
description,importance,start_date,target_date,amount,workdays
Curso,Alta,2024-06-01,2024-06-30,\"600,00\",
";
        let weekend: WeekdaySet = [Weekday::Sat, Weekday::Sun].into_iter().collect();
        let forms = load_from_str(csv, weekend).expect("should parse");

        assert_eq!(forms[0].workdays, weekend);
    }

    #[test]
    fn test_invalid_weekday_reports_row() {
        let csv = "\
description,importance,start_date,target_date,amount,workdays
A,Alta,2024-06-01,2024-06-30,100,Segunda
B,Alta,2024-06-01,2024-06-30,100,Segunda;Feriado
";
        match load_from_str(csv, WeekdaySet::workdays()).unwrap_err() {
            CsvLoadError::InvalidWeekday { name, row } => {
                assert_eq!(name, "Feriado");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidWeekday, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_reports_row() {
        let csv = "\
description,importance,start_date,target_date,amount,status
A,Alta,2024-06-01,2024-06-30,100,paused
";
        match load_from_str(csv, WeekdaySet::workdays()).unwrap_err() {
            CsvLoadError::InvalidStatus { status, row } => {
                assert_eq!(status, "paused");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_returns_parse_error() {
        let csv = "\
description,importance,start_date,target_date,amount
A,Alta,01/06/2024,2024-06-30,100
";
        assert!(matches!(
            load_from_str(csv, WeekdaySet::workdays()),
            Err(CsvLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_required_column_returns_parse_error() {
        let csv = "description,importance,start_date,amount\nA,Alta,2024-06-01,100\n";

        assert!(matches!(
            load_from_str(csv, WeekdaySet::workdays()),
            Err(CsvLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_unparseable_amount_is_kept_and_plans_to_zero() {
        let csv = "\
description,importance,start_date,target_date,amount
A,Alta,2024-06-03,2024-06-07,abc
";
        let forms = load_from_str(csv, WeekdaySet::workdays()).expect("should parse");

        assert_eq!(forms[0].amount, "abc");
        assert!(!forms[0].savings_plan().is_displayable());
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let csv = "description,importance,start_date,target_date,amount\n";

        assert!(load_from_str(csv, WeekdaySet::workdays()).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_around_values_is_trimmed() {
        let csv = "\
description , importance , start_date , target_date , amount
 Moto , Baixa , 2024-06-03 , 2024-06-07 , 500
";
        let forms = load_from_str(csv, WeekdaySet::workdays()).expect("should trim");

        assert_eq!(forms[0].description, "Moto");
        assert_eq!(forms[0].start_date, Some(date(2024, 6, 3)));
    }
}
