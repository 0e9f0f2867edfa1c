//! Configuration types for the payslip service.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use std::path::PathBuf;

use serde::Deserialize;

use crate::render::{DEFAULT_DATE_FORMAT, DEFAULT_FONT_SIZE, PayslipLayout};

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// Payslip document settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayslipConfig {
    /// Template PDF. Relative paths are resolved against the
    /// configuration directory.
    pub template_path: PathBuf,
    /// Text size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// strftime pattern for the issue date.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Contents of `app.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Server section.
    #[serde(default)]
    pub server: ServerConfig,
    /// Payslip section.
    pub payslip: PayslipConfig,
}

/// Everything loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Payslip settings, with `template_path` already resolved.
    pub payslip: PayslipConfig,
    /// Field positions from `layout.yaml`.
    pub layout: PayslipLayout,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
