//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::render::{PayslipLayout, PayslipRenderer, format_date};

use super::types::{AppConfig, AppSettings, PayslipConfig, ServerConfig};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payslip/
/// ├── app.yaml        # Server and payslip settings
/// ├── layout.yaml     # Field positions on the template
/// └── templates/
///     └── payslip.pdf # Template document
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payslip").unwrap();
/// println!("Listening on port {}", loader.server().port);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `app.yaml` or `layout.yaml` is missing.
    /// - `ConfigParseError` if either file is invalid YAML, lacks a required
    ///   field, the layout does not position every payslip field, or the
    ///   date format is unusable.
    ///
    /// The template file itself is not opened here; a missing template is
    /// reported when a payslip is rendered.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let app_path = path.join("app.yaml");
        let settings = Self::load_yaml::<AppSettings>(&app_path)?;

        let layout_path = path.join("layout.yaml");
        let layout = Self::load_yaml::<PayslipLayout>(&layout_path)?;

        let mut payslip = settings.payslip;
        if payslip.template_path.is_relative() {
            payslip.template_path = path.join(&payslip.template_path);
        }

        format_date(NaiveDate::default(), &payslip.date_format).map_err(|e| {
            EngineError::ConfigParseError {
                path: app_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        if !payslip.font_size.is_finite() || payslip.font_size <= 0.0 {
            return Err(EngineError::ConfigParseError {
                path: app_path.display().to_string(),
                message: format!("font_size must be positive, got {}", payslip.font_size),
            });
        }

        Ok(Self {
            config: AppConfig {
                server: settings.server,
                payslip,
                layout,
            },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the complete configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the payslip settings.
    pub fn payslip(&self) -> &PayslipConfig {
        &self.config.payslip
    }

    /// Returns the field layout.
    pub fn layout(&self) -> &PayslipLayout {
        &self.config.layout
    }

    /// Builds a renderer from the payslip settings and layout.
    pub fn renderer(&self) -> PayslipRenderer {
        PayslipRenderer::new(
            self.config.payslip.template_path.clone(),
            self.config.layout.clone(),
            self.config.payslip.font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Alignment, PayslipField};

    fn config_path() -> &'static str {
        "./config/payslip"
    }

    fn write_config(dir: &Path, app: &str, layout: Option<&str>) {
        fs::write(dir.join("app.yaml"), app).unwrap();
        if let Some(layout) = layout {
            fs::write(dir.join("layout.yaml"), layout).unwrap();
        }
    }

    fn shipped_layout() -> String {
        fs::read_to_string(Path::new(config_path()).join("layout.yaml")).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.payslip().font_size, 12.0);
        assert_eq!(loader.payslip().date_format, "%d/%m/%Y");
        assert!(loader.payslip().template_path.ends_with("templates/payslip.pdf"));
        assert!(loader.payslip().template_path.exists());
    }

    #[test]
    fn test_shipped_layout_matches_legacy_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.layout(), &PayslipLayout::legacy());
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        match ConfigLoader::load("./config/does-not-exist") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("app.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_layout_returns_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "payslip:\n  template_path: t.pdf\n", None);

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("layout.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_layout_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "payslip:\n  template_path: t.pdf\n",
            Some("fields:\n  issue_date: { x: 90, y: 263 }\n"),
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("layout.yaml"));
                assert!(message.contains("final_salary"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "payslip: [unclosed", Some(&shipped_layout()));

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => assert!(path.ends_with("app.yaml")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_format_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "payslip:\n  template_path: t.pdf\n  date_format: \"%d/%m/%\"\n",
            Some(&shipped_layout()),
        );

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_absolute_template_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("elsewhere.pdf");
        write_config(
            dir.path(),
            &format!(
                "server:\n  port: 9100\npayslip:\n  template_path: {}\n  font_size: 10\n",
                template.display()
            ),
            Some(&shipped_layout()),
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.payslip().template_path, template);
        assert_eq!(loader.server().port, 9100);
        assert_eq!(loader.renderer().template_path(), template.as_path());
    }

    #[test]
    fn test_layout_alignment_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let layout = shipped_layout().replace(
            "final_salary: { x: 254, y: 648 }",
            "final_salary: { x: 300, y: 648, align: right }",
        );
        write_config(dir.path(), "payslip:\n  template_path: t.pdf\n", Some(&layout));

        let loader = ConfigLoader::load(dir.path()).unwrap();
        let position = loader.layout().position(PayslipField::FinalSalary);
        assert_eq!(position.x, 300.0);
        assert_eq!(position.align, Alignment::Right);
    }
}
