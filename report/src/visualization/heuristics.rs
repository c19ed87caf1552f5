//! Horizontal bar chart of heuristic means

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use usability_survey_core::SurveyAnalysis;

use super::colors::strength_color;

/// Horizontal bar chart of heuristic means
pub struct HeuristicBarPlotter;

impl HeuristicBarPlotter {
    /// Plot one bar per heuristic, coloured by strength band
    pub fn plot(analysis: &SurveyAnalysis, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1400, 900)).into_drawing_area();
        root.fill(&WHITE)?;

        let names: Vec<String> = analysis.heuristics.iter().map(|h| h.name.clone()).collect();
        let x_max = x_limit(analysis);

        let mut chart = ChartBuilder::on(&root)
            .caption("PROMEDIO POR HEURÍSTICA DE USABILIDAD", ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(280)
            .build_cartesian_2d(0f64..x_max, (0..names.len()).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Puntuación Promedio (1-5)")
            .y_labels(names.len() + 1)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(idx) => names.get(*idx).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_formatter(&|x| format!("{:.1}", x))
            .draw()?;

        let bars = analysis
            .heuristics
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.mean.is_nan());

        chart.draw_series(bars.clone().map(|(idx, h)| {
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(idx)),
                    (h.mean, SegmentValue::Exact(idx + 1)),
                ],
                strength_color(h.strength).filled(),
            );
            bar.set_margin(8, 8, 0, 0);
            bar
        }))?;

        // Value labels just past the end of each bar
        chart.draw_series(bars.map(|(idx, h)| {
            Text::new(
                format!("{:.2}", h.mean),
                (h.mean + 0.05, SegmentValue::CenterOf(idx)),
                ("sans-serif", 18).into_font(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

/// Right edge of the x axis, wide enough for the value labels
fn x_limit(analysis: &SurveyAnalysis) -> f64 {
    analysis
        .heuristics
        .iter()
        .map(|h| h.mean)
        .filter(|m| !m.is_nan())
        .fold(5.0, f64::max)
        + 0.5
}
