//! Visualization and plotting

pub mod colors;
pub mod correlation;
pub mod heuristics;
pub mod questions;
pub mod radar;

pub use correlation::CorrelationHeatmapPlotter;
pub use heuristics::HeuristicBarPlotter;
pub use questions::QuestionTrendPlotter;
pub use radar::RadarPlotter;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use usability_survey_core::SurveyAnalysis;

/// File name of the heuristic bar chart
pub const HEURISTIC_BARS_FILE: &str = "promedio_heuristicas.png";
/// File name of the radar chart
pub const RADAR_FILE: &str = "radar_usabilidad.png";
/// File name of the question trend chart
pub const QUESTION_TREND_FILE: &str = "evolucion_preguntas.png";
/// File name of the correlation heatmap
pub const HEATMAP_FILE: &str = "heatmap_correlaciones.png";

/// Chart files in the order they are rendered
pub const CHART_FILES: [&str; 4] = [
    HEURISTIC_BARS_FILE,
    RADAR_FILE,
    QUESTION_TREND_FILE,
    HEATMAP_FILE,
];

/// Render all four charts into `dir`, creating it if needed
///
/// Returns the written paths in [`CHART_FILES`] order.
pub fn render_charts(analysis: &SurveyAnalysis, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;

    let renderers: [(&str, fn(&SurveyAnalysis, &Path) -> Result<()>); 4] = [
        (HEURISTIC_BARS_FILE, HeuristicBarPlotter::plot),
        (RADAR_FILE, RadarPlotter::plot),
        (QUESTION_TREND_FILE, QuestionTrendPlotter::plot),
        (HEATMAP_FILE, CorrelationHeatmapPlotter::plot),
    ];

    let mut written = Vec::with_capacity(renderers.len());
    for (file, plot) in renderers {
        let path = dir.join(file);
        plot(analysis, &path)
            .with_context(|| format!("Failed to render chart: {}", path.display()))?;
        debug!(path = %path.display(), "Chart rendered");
        written.push(path);
    }
    Ok(written)
}
