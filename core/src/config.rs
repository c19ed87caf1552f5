//! Report configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default survey export read when no path is given
pub const DEFAULT_CSV_PATH: &str = "Preguntas Nielsen (respuestas).csv";

/// Heuristic band thresholds
///
/// A heuristic mean at or above `high` is strong, at or above `medium` is
/// acceptable, anything below is weak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower bound of the High band
    pub high: f64,

    /// Lower bound of the Medium band
    pub medium: f64,

    /// Global mean at or above which usability is rated excellent
    pub excellent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 4.3,
            medium: 3.7,
            excellent: 4.0,
        }
    }
}

/// Report configuration
///
/// Describes where the survey is read from, where the artifacts go and
/// which stages of the pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Survey CSV export
    pub input: PathBuf,

    /// Directory every artifact is written under
    pub output_dir: PathBuf,

    /// Chart directory name, relative to `output_dir`
    pub charts_dir: String,

    /// Workbook file name, relative to `output_dir`
    pub workbook_name: String,

    /// JSON summary file name, relative to `output_dir`
    pub json_name: String,

    /// Band thresholds
    pub thresholds: Thresholds,

    /// Render the PNG charts
    pub charts: bool,

    /// Write the XLSX workbook
    pub excel: bool,

    /// Write the JSON summary
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_CSV_PATH),
            output_dir: PathBuf::from("."),
            charts_dir: "graficos".to_string(),
            workbook_name: "Reporte_Usabilidad_Completo.xlsx".to_string(),
            json_name: "resumen_usabilidad.json".to_string(),
            thresholds: Thresholds::default(),
            charts: true,
            excel: true,
            json: false,
        }
    }
}

impl ReportConfig {
    /// Create a new config reading the given CSV
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the band thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable chart rendering
    pub fn with_charts(mut self, enabled: bool) -> Self {
        self.charts = enabled;
        self
    }

    /// Enable or disable the workbook
    pub fn with_excel(mut self, enabled: bool) -> Self {
        self.excel = enabled;
        self
    }

    /// Enable or disable the JSON summary
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Directory the charts are written to
    pub fn charts_path(&self) -> PathBuf {
        self.output_dir.join(&self.charts_dir)
    }

    /// Full path of the workbook
    pub fn workbook_path(&self) -> PathBuf {
        self.output_dir.join(&self.workbook_name)
    }

    /// Full path of the JSON summary
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_name)
    }

    /// Survey CSV path
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let in_scale = |v: f64| v > 0.0 && v <= 5.0;

        if !in_scale(t.medium) || !in_scale(t.high) || t.medium > t.high {
            return Err(ConfigError::InvalidThresholds(format!(
                "expected 0 < medium <= high <= 5, got medium={} high={}",
                t.medium, t.high
            )));
        }

        if !in_scale(t.excellent) {
            return Err(ConfigError::InvalidThresholds(format!(
                "excellent threshold must be in (0, 5], got {}",
                t.excellent
            )));
        }

        for (field, value) in [
            ("charts_dir", &self.charts_dir),
            ("workbook_name", &self.workbook_name),
            ("json_name", &self.json_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Thresholds out of order or outside the 1-5 scale
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// An output name was left empty
    #[error("Empty file name for {0}")]
    EmptyName(&'static str),
}
