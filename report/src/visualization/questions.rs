//! Question-by-question score trend

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use usability_survey_core::SurveyAnalysis;

use super::colors::ROYAL_BLUE;

/// Line chart of question means
pub struct QuestionTrendPlotter;

impl QuestionTrendPlotter {
    /// Plot the mean of every question with the global mean as reference
    pub fn plot(analysis: &SurveyAnalysis, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1500, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = analysis.questions.iter().map(|q| q.question.label()).collect();
        let n = labels.len();
        let points: Vec<(SegmentValue<usize>, f64)> = analysis
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.mean.is_nan())
            .map(|(idx, q)| (SegmentValue::CenterOf(idx), q.mean))
            .collect();
        let (y_min, y_max) = y_bounds(points.iter().map(|(_, m)| *m));

        let mut chart = ChartBuilder::on(&root)
            .caption("EVOLUCIÓN DE PUNTUACIONES POR PREGUNTA", ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Preguntas (Q1 a Q20)")
            .y_desc("Puntuación Promedio")
            .x_labels(n + 1)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(idx) => labels.get(*idx).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;

        chart
            .draw_series(LineSeries::new(points.clone(), ROYAL_BLUE.stroke_width(2)))?
            .label("Promedio por pregunta")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &ROYAL_BLUE));

        chart.draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((x.clone(), *y), 5, RED.filled())),
        )?;

        let global = analysis.global.mean;
        if !global.is_nan() && n > 0 {
            chart
                .draw_series(LineSeries::new(
                    vec![
                        (SegmentValue::Exact(0), global),
                        (SegmentValue::Exact(n), global),
                    ],
                    RED.mix(0.7).stroke_width(2),
                ))?
                .label(format!("Promedio Global: {:.2}", global))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// Vertical range with half a point of headroom, never narrower than the 1-5 scale
fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((1.0f64, 5.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    ((lo - 0.5).max(0.0), hi + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_bounds_cover_scale() {
        assert_eq!(y_bounds([3.0, 4.2].into_iter()), (0.5, 5.5));
        assert_eq!(y_bounds(std::iter::empty()), (0.5, 5.5));
    }

    #[test]
    fn test_y_bounds_follow_outliers() {
        assert_eq!(y_bounds([0.0, 8.0].into_iter()), (0.0, 8.5));
    }
}
