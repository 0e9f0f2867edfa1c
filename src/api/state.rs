//! Application state for the payslip API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::render::PayslipRenderer;
use crate::store::EmployeeStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// employee store and the payslip renderer.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EmployeeStore>,
    renderer: Arc<PayslipRenderer>,
    date_format: Arc<str>,
}

impl AppState {
    /// Creates application state from its parts.
    pub fn new(
        store: Arc<dyn EmployeeStore>,
        renderer: PayslipRenderer,
        date_format: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            renderer: Arc::new(renderer),
            date_format: date_format.into(),
        }
    }

    /// Creates application state from loaded configuration.
    pub fn from_config(config: &ConfigLoader, store: Arc<dyn EmployeeStore>) -> Self {
        Self::new(
            store,
            config.renderer(),
            config.payslip().date_format.as_str(),
        )
    }

    /// Returns the employee store.
    pub fn store(&self) -> &dyn EmployeeStore {
        self.store.as_ref()
    }

    /// Returns a shared handle to the payslip renderer.
    pub fn renderer(&self) -> Arc<PayslipRenderer> {
        Arc::clone(&self.renderer)
    }

    /// Returns the issue date format.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }
}
