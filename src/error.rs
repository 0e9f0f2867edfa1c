//! Error types for the payslip engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a calculation, render, or record-store request can hit.
//! None of them is fatal to the process; each is scoped to one request.

use thiserror::Error;

/// The main error type for the payslip engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "holidays_taken".to_string(),
///     message: "must be between 0 and 14, got 15".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid value for 'holidays_taken': must be between 0 and 14, got 15"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input was malformed or out of range. Raised before any computation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The offending input field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The payslip template document could not be located.
    #[error("Payslip template not found: {path}")]
    TemplateMissing {
        /// The path that was looked up.
        path: String,
    },

    /// The computed fields could not be written into the output document.
    #[error("Failed to render payslip: {message}")]
    RenderError {
        /// A description of the rendering failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee record exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// Another employee already holds this identity number.
    #[error("An employee with id number '{id_number}' already exists")]
    DuplicateIdNumber {
        /// The conflicting identity number.
        id_number: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`EngineError::RenderError`].
    pub fn render(message: impl std::fmt::Display) -> Self {
        EngineError::RenderError {
            message: message.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
