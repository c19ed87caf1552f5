//! Survey aggregation
//!
//! Derives every figure the report shows from a [`SurveyTable`]: question
//! means, heuristic means with their strength band, the global score and the
//! question correlation matrix. Nothing here is cached between runs.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::config::Thresholds;
use crate::dataset::SurveyTable;
use crate::heuristics::{heuristics, Heuristic, Level, QuestionId, Strength, QUESTION_COUNT};
use crate::stats;

/// Mean and spread of one question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStats {
    /// Question
    pub question: QuestionId,
    /// Mean of the answered cells
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Answered cells
    pub answered: usize,
}

/// Mean and spread of one heuristic
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicStats {
    /// 1-based heuristic id
    pub id: usize,
    /// Numbered name, e.g. `4. Consistencia`
    pub name: String,
    /// Short label, e.g. `Heurística 4`
    pub label: String,
    /// The two scoring questions
    pub questions: (QuestionId, QuestionId),
    /// Mean of the per-respondent pair averages
    pub mean: f64,
    /// Sample standard deviation of the pair averages
    pub std_dev: f64,
    /// Band of `mean`
    pub strength: Strength,
}

impl HeuristicStats {
    /// Question pair as `Q7, Q8`
    pub fn questions_label(&self) -> String {
        format!("{}, {}", self.questions.0, self.questions.1)
    }
}

/// Score over every cell of the table
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    /// Mean of all answered cells
    pub mean: f64,
    /// Population standard deviation of all answered cells
    pub std_dev: f64,
    /// `mean` on a 0-100 scale
    pub percentage: f64,
    /// Qualitative level of `mean`
    pub level: Level,
}

/// Pearson correlation between every pair of questions
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlations of all question columns, pairwise-complete
    pub fn compute(table: &SurveyTable) -> Self {
        let columns: Vec<Vec<Option<f64>>> = QuestionId::all().map(|q| table.column(q)).collect();
        let mut values = vec![vec![f64::NAN; QUESTION_COUNT]; QUESTION_COUNT];
        for i in 0..QUESTION_COUNT {
            for j in 0..=i {
                let r = stats::pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { values }
    }

    /// Correlation between two questions
    pub fn get(&self, a: QuestionId, b: QuestionId) -> f64 {
        self.values[a.index()][b.index()]
    }

    /// Matrix rows in question order
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// Every aggregate the report is built from
#[derive(Debug, Clone, Serialize)]
pub struct SurveyAnalysis {
    /// Respondents in the table
    pub respondents: usize,
    /// Per-question results, Q1..Q20
    pub questions: Vec<QuestionStats>,
    /// Per-heuristic results, 1..10
    pub heuristics: Vec<HeuristicStats>,
    /// Whole-table results
    pub global: GlobalStats,
    /// Question correlation matrix
    pub correlations: CorrelationMatrix,
}

impl SurveyAnalysis {
    /// Aggregate a survey table
    pub fn compute(table: &SurveyTable, thresholds: &Thresholds) -> Self {
        let questions: Vec<QuestionStats> = QuestionId::all()
            .map(|question| {
                let column = table.column(question);
                QuestionStats {
                    question,
                    mean: stats::mean(&column),
                    std_dev: stats::sample_std(&column),
                    answered: column.iter().flatten().count(),
                }
            })
            .collect();

        let heuristics: Vec<HeuristicStats> = heuristics()
            .map(|h| heuristic_stats(table, h, thresholds))
            .collect();

        let cells: Vec<Option<f64>> = table.cells().collect();
        let global_mean = stats::mean(&cells);
        let global = GlobalStats {
            mean: global_mean,
            std_dev: stats::population_std(&cells),
            percentage: global_mean * 20.0,
            level: Level::classify(global_mean, thresholds),
        };

        debug!(
            respondents = table.respondents(),
            global_mean = global.mean,
            "Survey aggregated"
        );

        Self {
            respondents: table.respondents(),
            questions,
            heuristics,
            global,
            correlations: CorrelationMatrix::compute(table),
        }
    }

    /// Stats of a single question
    pub fn question(&self, question: QuestionId) -> &QuestionStats {
        &self.questions[question.index()]
    }

    /// The `n` highest question means, ties kept in question order
    pub fn top_questions(&self, n: usize) -> Vec<&QuestionStats> {
        self.ranked_questions(|a, b| b.total_cmp(a), n)
    }

    /// The `n` lowest question means, ties kept in question order
    pub fn bottom_questions(&self, n: usize) -> Vec<&QuestionStats> {
        self.ranked_questions(|a, b| a.total_cmp(b), n)
    }

    fn ranked_questions(
        &self,
        cmp: impl Fn(&f64, &f64) -> Ordering,
        n: usize,
    ) -> Vec<&QuestionStats> {
        let mut ranked: Vec<&QuestionStats> =
            self.questions.iter().filter(|q| !q.mean.is_nan()).collect();
        ranked.sort_by(|a, b| cmp(&a.mean, &b.mean));
        ranked.truncate(n);
        ranked
    }

    /// Lowest and highest question mean
    pub fn score_range(&self) -> Option<(f64, f64)> {
        let means = self.questions.iter().map(|q| q.mean).filter(|m| !m.is_nan());
        means.fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
    }

    /// Highest-scoring heuristic, first one on ties
    pub fn best_heuristic(&self) -> Option<&HeuristicStats> {
        self.extreme_heuristic(|candidate, current| candidate > current)
    }

    /// Lowest-scoring heuristic, first one on ties
    pub fn worst_heuristic(&self) -> Option<&HeuristicStats> {
        self.extreme_heuristic(|candidate, current| candidate < current)
    }

    fn extreme_heuristic(&self, better: impl Fn(f64, f64) -> bool) -> Option<&HeuristicStats> {
        self.heuristics
            .iter()
            .filter(|h| !h.mean.is_nan())
            .fold(None, |acc: Option<&HeuristicStats>, h| match acc {
                Some(current) if !better(h.mean, current.mean) => Some(current),
                _ => Some(h),
            })
    }
}

/// Mean of each respondent's two answers, then mean/std over respondents
fn heuristic_stats(table: &SurveyTable, h: Heuristic, thresholds: &Thresholds) -> HeuristicStats {
    let (qa, qb) = h.questions();
    let pair_means: Vec<Option<f64>> = table
        .rows()
        .iter()
        .map(|row| {
            let pair = [row[qa.index()], row[qb.index()]];
            let m = stats::mean(&pair);
            (!m.is_nan()).then_some(m)
        })
        .collect();

    let mean = stats::mean(&pair_means);
    HeuristicStats {
        id: h.id(),
        name: h.display_name(),
        label: h.short_label(),
        questions: (qa, qb),
        mean,
        std_dev: stats::sample_std(&pair_means),
        strength: Strength::classify(mean, thresholds),
    }
}
