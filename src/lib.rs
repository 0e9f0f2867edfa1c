//! Monthly salary adjustment and payslip engine.
//!
//! This crate derives daily and hourly rates from a monthly salary, applies
//! a month's absences, extra work and advances to produce the final salary,
//! and overlays the result onto a PDF payslip template.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
