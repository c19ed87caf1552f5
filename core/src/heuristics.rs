//! Nielsen heuristic catalog
//!
//! The survey scores each of Nielsen's ten usability heuristics with two
//! adjacent questions: heuristic `h` owns questions `2h-1` and `2h`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Thresholds;

/// Number of survey questions
pub const QUESTION_COUNT: usize = 20;

/// Number of heuristics
pub const HEURISTIC_COUNT: usize = 10;

const HEURISTIC_NAMES: [&str; HEURISTIC_COUNT] = [
    "Visibilidad del Estado",
    "Lenguaje Familiar",
    "Control y Libertad",
    "Consistencia",
    "Prevención de Errores",
    "Reconocer vs Recordar",
    "Eficiencia",
    "Diseño Minimalista",
    "Recuperación de Errores",
    "Ayuda y Documentación",
];

/// Survey question, numbered 1..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(u8);

impl QuestionId {
    /// Question by 1-based number
    pub fn new(number: usize) -> Option<Self> {
        (1..=QUESTION_COUNT)
            .contains(&number)
            .then_some(Self(number as u8))
    }

    /// All questions in order
    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=QUESTION_COUNT as u8).map(Self)
    }

    /// 0-based column index
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Column label, e.g. `Q7`
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// One of the ten usability heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heuristic {
    id: usize,
    name: &'static str,
}

impl Heuristic {
    /// Heuristic by 1-based id
    pub fn get(id: usize) -> Option<Self> {
        HEURISTIC_NAMES
            .get(id.checked_sub(1)?)
            .map(|&name| Self { id, name })
    }

    /// 1-based id
    pub fn id(&self) -> usize {
        self.id
    }

    /// Numbered name, e.g. `4. Consistencia`
    pub fn display_name(&self) -> String {
        format!("{}. {}", self.id, self.name)
    }

    /// Short label, e.g. `Heurística 4`
    pub fn short_label(&self) -> String {
        format!("Heurística {}", self.id)
    }

    /// The two questions scoring this heuristic
    pub fn questions(&self) -> (QuestionId, QuestionId) {
        (QuestionId(2 * self.id as u8 - 1), QuestionId(2 * self.id as u8))
    }
}

/// All heuristics in catalog order
pub fn heuristics() -> impl Iterator<Item = Heuristic> {
    (1..=HEURISTIC_COUNT).filter_map(Heuristic::get)
}

/// Strength band of a heuristic mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    /// At or above the high threshold
    High,
    /// At or above the medium threshold
    Medium,
    /// Below the medium threshold
    Low,
}

impl Strength {
    /// Classify a mean score; NaN falls into `Low`
    pub fn classify(score: f64, thresholds: &Thresholds) -> Self {
        if score >= thresholds.high {
            Strength::High
        } else if score >= thresholds.medium {
            Strength::Medium
        } else {
            Strength::Low
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            Strength::High => "Alta",
            Strength::Medium => "Media",
            Strength::Low => "Baja",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative usability level of the global score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// At or above the excellence threshold
    Excellent,
    /// Below it
    Acceptable,
}

impl Level {
    /// Classify the global mean
    pub fn classify(score: f64, thresholds: &Thresholds) -> Self {
        if score >= thresholds.excellent {
            Level::Excellent
        } else {
            Level::Acceptable
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            Level::Excellent => "Excelente",
            Level::Acceptable => "Aceptable",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
