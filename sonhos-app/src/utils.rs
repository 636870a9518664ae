use chrono::NaiveDate;
use rust_decimal::Decimal;
use sonhos_core::calculations::common::round_half_up;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a calendar date.
#[derive(Debug, Error)]
#[error("invalid date '{input}': expected YYYY-MM-DD or DD/MM/YYYY")]
pub struct ParseDateError {
    input: String,
}

/// Error returned when a string cannot be parsed as a month.
#[derive(Debug, Error)]
#[error("invalid month '{input}': expected YYYY-MM")]
pub struct ParseMonthError {
    input: String,
}

/// Parses a date written either as ISO `2024-06-10` or Brazilian `10/06/2024`.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseDateError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|e| {
            tracing::warn!(input = %s, "invalid date: {}", e);
            ParseDateError {
                input: s.to_string(),
            }
        })
}

/// Parses `2024-06` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, ParseMonthError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").map_err(|_| ParseMonthError {
        input: s.to_string(),
    })
}

/// Formats an amount with exactly two decimal places.
pub fn amount_display(d: Decimal) -> String {
    let mut rounded = round_half_up(d);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats an optional date for display, using "—" when `None`.
pub fn opt_date_display(d: &Option<NaiveDate>) -> String {
    d.as_ref()
        .map(|v| v.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_accepts_iso_and_brazilian_formats() {
        assert_eq!(parse_date("2024-06-10").unwrap(), date(2024, 6, 10));
        assert_eq!(parse_date(" 10/06/2024 ").unwrap(), date(2024, 6, 10));
    }

    #[test]
    fn parse_date_rejects_impossible_dates() {
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("amanhã").is_err());
    }

    #[test]
    fn parse_month_yields_first_day() {
        assert_eq!(parse_month("2024-06").unwrap(), date(2024, 6, 1));
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn amount_display_rounds_to_cents() {
        assert_eq!(amount_display(dec!(1000) / dec!(3)), "333.33");
        assert_eq!(amount_display(dec!(200)), "200.00");
        assert_eq!(amount_display(dec!(200.00)), "200.00");
    }

    #[test]
    fn opt_date_display_uses_brazilian_order() {
        assert_eq!(opt_date_display(&Some(date(2024, 6, 3))), "03/06/2024");
        assert_eq!(opt_date_display(&None), "—");
    }
}
