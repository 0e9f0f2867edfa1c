//! Payslip rendering.
//!
//! Values are formatted into strings ([`PayslipValues`]), positioned by a
//! [`PayslipLayout`] and drawn onto the first page of a template PDF.

mod layout;
mod pdf;
mod values;

pub use layout::{Alignment, FieldPosition, PayslipField, PayslipLayout};
pub use pdf::{DEFAULT_FONT_SIZE, PayslipRenderer, render_payslip, text_width};
pub use values::{DEFAULT_DATE_FORMAT, PayslipValues, format_date};
