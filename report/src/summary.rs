//! Console summary of the survey results

use std::fmt;
use std::io::{self, Write};
use usability_survey_core::{Level, SurveyAnalysis};

const RULE_WIDTH: usize = 70;
const RANKED_QUESTIONS: usize = 3;

/// Fixed-point display that prints undefined scores as `nan`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fixed(pub f64, pub usize);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.*}", self.1, self.0)
        }
    }
}

/// Console report printer
pub struct SummaryPrinter;

impl SummaryPrinter {
    /// Write the full textual summary
    ///
    /// The output depends only on the analysis, so identical input always
    /// produces identical text.
    pub fn write<W: Write>(analysis: &SurveyAnalysis, out: &mut W) -> io::Result<()> {
        Self::write_averages(analysis, out)?;
        Self::write_report(analysis, out)
    }

    /// Render the summary into a string
    pub fn render(analysis: &SurveyAnalysis) -> io::Result<String> {
        let mut buf = Vec::new();
        Self::write(analysis, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_averages<W: Write>(analysis: &SurveyAnalysis, out: &mut W) -> io::Result<()> {
        writeln!(out, "=== Promedio por PREGUNTA (Q1..Q20) ===")?;
        for q in &analysis.questions {
            writeln!(out, "{}: {}", q.question, Fixed(q.mean, 4))?;
        }

        writeln!(out)?;
        writeln!(out, "=== Promedio por HEURÍSTICA (cada par de preguntas) ===")?;
        for h in &analysis.heuristics {
            writeln!(
                out,
                "{} ({}): {}",
                h.label,
                h.questions_label(),
                Fixed(h.mean, 4)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "=== Promedio GLOBAL ===")?;
        writeln!(out, "Global: {}", Fixed(analysis.global.mean, 4))?;
        Ok(())
    }

    fn write_report<W: Write>(analysis: &SurveyAnalysis, out: &mut W) -> io::Result<()> {
        let global = &analysis.global;

        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "           INFORME COMPLETO DE USABILIDAD")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        writeln!(out)?;
        writeln!(
            out,
            "📈 PUNTUACIÓN GLOBAL: {}/5.0 → {}%",
            Fixed(global.mean, 2),
            Fixed(global.percentage, 1)
        )?;
        match global.level {
            Level::Excellent => writeln!(out, "   ✅ NIVEL: USABILIDAD EXCELENTE")?,
            Level::Acceptable => writeln!(out, "   ⚠️  NIVEL: USABILIDAD ACEPTABLE")?,
        }

        writeln!(out)?;
        let (lo, hi) = analysis.score_range().unwrap_or((f64::NAN, f64::NAN));
        writeln!(
            out,
            "🎯 RANGO DE PUNTUACIONES: {} - {}",
            Fixed(lo, 2),
            Fixed(hi, 2)
        )?;
        writeln!(
            out,
            "📊 CONSISTENCIA: Desviación estándar global {}",
            Fixed(global.std_dev, 2)
        )?;

        writeln!(out)?;
        writeln!(out, "🔍 TOP 3 PREGUNTAS MÁS ALTAS:")?;
        for q in analysis.top_questions(RANKED_QUESTIONS) {
            writeln!(out, "   🏆 {}: {}", q.question, Fixed(q.mean, 2))?;
        }

        writeln!(out)?;
        writeln!(out, "🔧 TOP 3 PREGUNTAS MÁS BAJAS:")?;
        for q in analysis.bottom_questions(RANKED_QUESTIONS) {
            writeln!(out, "   📍 {}: {}", q.question, Fixed(q.mean, 2))?;
        }
        Ok(())
    }
}
