//! Correlation heatmap between questions

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use usability_survey_core::{CorrelationMatrix, SurveyAnalysis};

use super::colors::coolwarm;

const GRADIENT_STEPS: usize = 100;

/// Heatmap of question correlations
pub struct CorrelationHeatmapPlotter;

impl CorrelationHeatmapPlotter {
    /// Plot the lower triangle of the question correlation matrix
    pub fn plot(analysis: &SurveyAnalysis, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1300, 1100)).into_drawing_area();
        root.fill(&WHITE)?;
        let (matrix_area, scale_area) = root.split_horizontally(1150);

        let matrix = &analysis.correlations;
        let n = matrix.rows().len();
        let labels: Vec<String> = analysis.questions.iter().map(|q| q.question.label()).collect();
        // Row 0 (Q1) is drawn at the top
        let flip = |row: usize| n - 1 - row;

        let mut chart = ChartBuilder::on(&matrix_area)
            .caption("MATRIZ DE CORRELACIÓN ENTRE PREGUNTAS", ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n + 1)
            .y_labels(n + 1)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(idx) => labels.get(*idx).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(idx) if *idx < n => {
                    labels.get(flip(*idx)).cloned().unwrap_or_default()
                }
                _ => String::new(),
            })
            .draw()?;

        let cells = lower_triangle(matrix);

        chart.draw_series(cells.iter().map(|&(row, col, r)| {
            let y = flip(row);
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                ],
                coolwarm(r).filled(),
            )
        }))?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        chart.draw_series(cells.iter().map(|&(row, col, r)| {
            Text::new(
                format!("{:.2}", r),
                (SegmentValue::CenterOf(col), SegmentValue::CenterOf(flip(row))),
                TextStyle::from(("sans-serif", 11).into_font()).pos(centered),
            )
        }))?;

        Self::draw_scale(&scale_area)?;

        root.present()?;
        Ok(())
    }

    /// Colour bar from -1 to 1
    fn draw_scale(area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> Result<()> {
        let mut bar = ChartBuilder::on(area)
            .margin_top(220)
            .margin_bottom(220)
            .margin_right(20)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..1f64, -1f64..1f64)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(9)
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;

        let step = 2.0 / GRADIENT_STEPS as f64;
        bar.draw_series((0..GRADIENT_STEPS).map(|k| {
            let lo = -1.0 + k as f64 * step;
            Rectangle::new([(0.0, lo), (1.0, lo + step)], coolwarm(lo + step / 2.0).filled())
        }))?;

        Ok(())
    }
}

/// Cells strictly below the diagonal with a defined correlation, as `(row, col, r)`
fn lower_triangle(matrix: &CorrelationMatrix) -> Vec<(usize, usize, f64)> {
    matrix
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(row, values)| {
            values
                .iter()
                .take(row)
                .enumerate()
                .filter(|(_, r)| !r.is_nan())
                .map(move |(col, &r)| (row, col, r))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usability_survey_core::{Row, SurveyTable, Thresholds, QUESTION_COUNT};

    fn analysis_for(rows: Vec<Row>) -> SurveyAnalysis {
        SurveyAnalysis::compute(&SurveyTable::from_rows(rows), &Thresholds::default())
    }

    #[test]
    fn test_lower_triangle_excludes_diagonal() {
        let rows: Vec<Row> = (0..5)
            .map(|r| {
                let mut row = [None; QUESTION_COUNT];
                for (q, cell) in row.iter_mut().enumerate() {
                    *cell = Some(((r * (q + 1)) % 5 + 1) as f64);
                }
                row
            })
            .collect();
        let analysis = analysis_for(rows);
        let cells = lower_triangle(&analysis.correlations);

        assert!(cells.iter().all(|&(row, col, _)| col < row));
        assert!(cells.iter().all(|&(_, _, r)| (-1.0..=1.0).contains(&r)));
    }

    #[test]
    fn test_lower_triangle_skips_undefined() {
        // Constant answers have no correlation at all
        let analysis = analysis_for(vec![[Some(4.0); QUESTION_COUNT]; 3]);
        assert!(lower_triangle(&analysis.correlations).is_empty());
    }
}
