//! Calculation logic for the payslip engine.
//!
//! This module contains rate derivation (monthly salary to day and hour
//! rates), the period adjustment calculation, currency rounding, and the
//! per-employee period summary.

mod adjustment;
mod period_summary;
mod rate_deriver;
mod rounding;

pub use adjustment::{calculate_adjustment, premium_multiplier};
pub use period_summary::summarize_period;
pub use rate_deriver::{STANDARD_WORKDAY_HOURS, days_in_month, derive_rates};
pub use rounding::{CURRENCY_DP, fixed_2dp, format_currency, round_currency};
