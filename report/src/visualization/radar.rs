//! Radar (spider) chart of the heuristic profile
//!
//! plotters has no polar coordinates, so the radar is drawn on a square
//! cartesian chart: spokes start at 12 o'clock and advance clockwise, the
//! radius is the score on the 0-5 scale.

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use std::path::Path;
use usability_survey_core::SurveyAnalysis;

use super::colors::{GREY, SEA_GREEN};

const RINGS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
const RADIUS: f64 = 5.0;
const LABEL_RADIUS: f64 = 5.9;
const EXTENT: f64 = 7.4;

/// Radar chart of the heuristic profile
pub struct RadarPlotter;

impl RadarPlotter {
    /// Plot the heuristic means as a closed, filled polygon
    pub fn plot(analysis: &SurveyAnalysis, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1000, 1000)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("PERFIL DE USABILIDAD - GRÁFICO RADAR", ("sans-serif", 32))
            .margin(20)
            .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)?;

        let spokes = analysis.heuristics.len();

        // Grid: concentric rings and one spoke per heuristic
        chart.draw_series(RINGS.iter().map(|&r| {
            let ring: Vec<(f64, f64)> = (0..=72).map(|k| polar(r, TAU * k as f64 / 72.0)).collect();
            PathElement::new(ring, GREY.mix(0.4).stroke_width(1))
        }))?;
        chart.draw_series((0..spokes).map(|i| {
            PathElement::new(
                vec![(0.0, 0.0), polar(RADIUS, spoke_angle(i, spokes))],
                GREY.mix(0.4).stroke_width(1),
            )
        }))?;
        chart.draw_series(RINGS.iter().map(|&r| {
            Text::new(
                format!("{r:.0}"),
                (0.08, r + 0.08),
                ("sans-serif", 14).into_font().color(&GREY),
            )
        }))?;

        let values: Vec<f64> = analysis.heuristics.iter().map(|h| h.mean).collect();
        let outline = closed_outline(&values);

        chart.draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            SEA_GREEN.mix(0.25).filled(),
        )))?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                outline.clone(),
                SEA_GREEN.stroke_width(2),
            )))?
            .label("Puntuación")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &SEA_GREEN));
        chart.draw_series(
            outline
                .iter()
                .skip(1)
                .map(|&p| Circle::new(p, 5, SEA_GREEN.filled())),
        )?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        chart.draw_series(analysis.heuristics.iter().enumerate().map(|(i, h)| {
            Text::new(
                h.name.clone(),
                polar(LABEL_RADIUS, spoke_angle(i, spokes)),
                TextStyle::from(("sans-serif", 16).into_font()).pos(centered),
            )
        }))?;

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// Angle of spoke `i`, measured clockwise from 12 o'clock
fn spoke_angle(i: usize, spokes: usize) -> f64 {
    TAU * i as f64 / spokes.max(1) as f64
}

/// Cartesian position of a point at `radius` along a clockwise-from-top angle
fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

/// Polygon vertices for the values, with the first vertex repeated at the end
///
/// Undefined values collapse onto the centre.
fn closed_outline(values: &[f64]) -> Vec<(f64, f64)> {
    let spokes = values.len();
    let mut points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let r = if v.is_nan() { 0.0 } else { v.clamp(0.0, RADIUS) };
            polar(r, spoke_angle(i, spokes))
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}
