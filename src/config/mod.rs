//! Configuration loading for the payslip service.
//!
//! This module loads server settings, payslip settings and the field layout
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payslip").unwrap();
//! println!("Template: {}", config.payslip().template_path.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, AppSettings, PayslipConfig, ServerConfig};
