//! JSON export functionality

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use usability_survey_core::{QuestionStats, ReportConfig, SurveyAnalysis};

/// Writes the analysis results as a JSON document
pub struct JsonExporter;

impl JsonExporter {
    /// Export the summary and the configuration that produced it
    pub fn export(analysis: &SurveyAnalysis, config: &ReportConfig, path: &Path) -> Result<()> {
        let output = Self::document(analysis, config)?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &output)?;

        Ok(())
    }

    /// Build the JSON document without touching the filesystem
    pub fn document(analysis: &SurveyAnalysis, config: &ReportConfig) -> Result<Value> {
        let global = &analysis.global;
        let best = analysis.best_heuristic().map(|h| h.name.as_str());
        let worst = analysis.worst_heuristic().map(|h| h.name.as_str());

        let ranked = |questions: Vec<&QuestionStats>| -> Vec<Value> {
            questions
                .into_iter()
                .map(|q| json!({ "question": q.question.label(), "mean": q.mean }))
                .collect()
        };

        Ok(json!({
            "respondents": analysis.respondents,
            "global": {
                "mean": global.mean,
                "std_dev": global.std_dev,
                "percentage": global.percentage,
                "level": global.level.label(),
            },
            "best_heuristic": best,
            "worst_heuristic": worst,
            "top_questions": ranked(analysis.top_questions(3)),
            "bottom_questions": ranked(analysis.bottom_questions(3)),
            "questions": serde_json::to_value(&analysis.questions)?,
            "heuristics": serde_json::to_value(&analysis.heuristics)?,
            "config": serde_json::to_value(config)?,
        }))
    }
}
