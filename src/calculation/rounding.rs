//! Currency rounding and display helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on monetary output fields.
pub const CURRENCY_DP: u32 = 2;

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// The result always carries a scale of 2, so it serializes as `"100.00"`
/// rather than `"100"`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_currency(Decimal::from_str("-2.345").unwrap()).to_string(), "-2.35");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_DP);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Renders a value with exactly two decimals, e.g. `3000` as `"3000.00"`.
pub fn fixed_2dp(value: Decimal) -> String {
    round_currency(value).to_string()
}

/// Renders a value with two decimals and comma thousands separators.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456789, 2)), "1,234,567.89");
/// assert_eq!(format_currency(Decimal::new(-3000, 0)), "-3,000.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let plain = fixed_2dp(value.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if round_currency(value) < Decimal::ZERO { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
