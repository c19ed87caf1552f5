//! usability-survey-core: data model and statistics for heuristic usability surveys
//!
//! This crate provides everything the report is computed from:
//!
//! - The survey response table and its CSV loader
//! - The fixed catalog of Nielsen heuristics and their question pairs
//! - Descriptive statistics and the aggregated analysis
//! - Report configuration
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod heuristics;
pub mod stats;

pub use analysis::*;
pub use config::{ConfigError, ReportConfig, Thresholds, DEFAULT_CSV_PATH};
pub use dataset::{Row, SurveyTable};
pub use error::*;
pub use heuristics::*;
