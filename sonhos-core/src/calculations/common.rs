//! Common utility functions for savings calculations.
//!
//! This module provides shared functionality used across the calculators,
//! including rounding and parsing of amounts typed with Brazilian separators.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

/// Leading unsigned decimal number, after separators have been normalized.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\+?(\d+(?:\.\d*)?|\.\d+)").expect("numeric prefix pattern is valid")
});

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use sonhos_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(333.333333)), dec!(333.33));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses an amount typed as `1.234,56`: `.` groups thousands, `,` marks
/// the decimals.
///
/// All dots are dropped and the first comma becomes the decimal point. The
/// longest leading number is then taken, so trailing garbage is ignored
/// (`"12abc"` is 12). This never fails: input with no leading number, or a
/// negative sign, yields `None`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use sonhos_core::calculations::common::parse_locale_amount;
///
/// assert_eq!(parse_locale_amount("1.234,56"), Some(dec!(1234.56)));
/// assert_eq!(parse_locale_amount("500,00"), Some(dec!(500.00)));
/// assert_eq!(parse_locale_amount("abc"), None);
/// assert_eq!(parse_locale_amount(""), None);
/// ```
pub fn parse_locale_amount(input: &str) -> Option<Decimal> {
    let normalized = input.replace('.', "").replacen(',', ".", 1);

    let Some(captures) = NUMERIC_PREFIX.captures(&normalized) else {
        if !input.trim().is_empty() {
            warn!(input = %input, "amount is not numeric; treating as unset");
        }
        return None;
    };

    let digits = captures[1].trim_end_matches('.');
    let digits = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    digits.parse::<Decimal>().map_or_else(
        |e| {
            warn!(input = %input, "amount out of range: {}", e);
            None
        },
        Some,
    )
}
