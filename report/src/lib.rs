//! Report generation for usability survey results
//!
//! This crate turns a [`SurveyAnalysis`](usability_survey_core::SurveyAnalysis) into:
//!
//! - A console summary
//! - PNG charts
//! - An Excel workbook (xlsx)
//! - An optional JSON summary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod excel;
pub mod json_export;
pub mod summary;
pub mod visualization;

pub use excel::{Cell, ExcelExporter, SheetTable};
pub use json_export::JsonExporter;
pub use summary::SummaryPrinter;
pub use visualization::{render_charts, CHART_FILES};
