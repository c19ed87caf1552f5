//! Survey response table
//!
//! Loads the survey export into a respondents × 20 table of scores. Cells
//! that are not finite numbers become missing values.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::heuristics::{QuestionId, QUESTION_COUNT};

/// Lowest score on the survey scale
pub const SCALE_MIN: f64 = 1.0;

/// Highest score on the survey scale
pub const SCALE_MAX: f64 = 5.0;

/// One respondent's answers, indexed by question
pub type Row = [Option<f64>; QUESTION_COUNT];

/// Survey responses, one row per respondent and one column per question
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyTable {
    rows: Vec<Row>,
    coerced: usize,
    out_of_scale: usize,
}

impl SurveyTable {
    /// Build a table from already parsed rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let out_of_scale = count_out_of_scale(&rows);
        Self {
            rows,
            coerced: 0,
            out_of_scale,
        }
    }

    /// Load a survey export from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            respondents = table.respondents(),
            "Loaded survey responses"
        );
        Ok(table)
    }

    /// Parse a survey export with a header row
    ///
    /// A 20-column header is renamed to `Q1..Q20` positionally; any other
    /// header must name every question.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = question_columns(rdr.headers()?)?;

        let mut rows = Vec::new();
        let mut coerced = 0usize;
        for record in rdr.records() {
            let record = record?;
            let mut row: Row = [None; QUESTION_COUNT];
            for (slot, &col) in row.iter_mut().zip(columns.iter()) {
                let raw = record.get(col).unwrap_or("");
                *slot = parse_score(raw);
                if slot.is_none() {
                    coerced += 1;
                }
            }
            rows.push(row);
        }

        let out_of_scale = count_out_of_scale(&rows);
        if coerced > 0 {
            debug!(cells = coerced, "Non-numeric cells coerced to missing");
        }
        if out_of_scale > 0 {
            warn!(
                cells = out_of_scale,
                "Scores outside the {SCALE_MIN}-{SCALE_MAX} scale were kept as-is"
            );
        }

        Ok(Self {
            rows,
            coerced,
            out_of_scale,
        })
    }

    /// Number of respondents
    pub fn respondents(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no respondents
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), QUESTION_COUNT)
    }

    /// All respondent rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A single respondent's answers
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All answers to one question
    pub fn column(&self, question: QuestionId) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row[question.index()]).collect()
    }

    /// Every cell, row-major, including missing ones
    pub fn cells(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of missing cells
    pub fn missing_count(&self) -> usize {
        self.cells().filter(Option::is_none).count()
    }

    /// Number of cells that failed numeric coercion while loading
    pub fn coerced_count(&self) -> usize {
        self.coerced
    }

    /// Number of present cells outside the 1-5 scale
    pub fn out_of_scale_count(&self) -> usize {
        self.out_of_scale
    }
}

/// Resolve which CSV column feeds each question
fn question_columns(headers: &StringRecord) -> Result<[usize; QUESTION_COUNT]> {
    let mut columns = [0usize; QUESTION_COUNT];

    if headers.len() == QUESTION_COUNT {
        for (idx, col) in columns.iter_mut().enumerate() {
            *col = idx;
        }
        return Ok(columns);
    }

    for question in QuestionId::all() {
        let label = question.label();
        let position = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(&label))
            .ok_or(Error::MissingQuestion(label))?;
        columns[question.index()] = position;
    }
    debug!(columns = headers.len(), "Matched question columns by name");
    Ok(columns)
}

/// Coerce a raw cell to a score; anything that is not a finite number is missing
fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_out_of_scale(rows: &[Row]) -> usize {
    rows.iter()
        .flat_map(|row| row.iter().flatten())
        .filter(|&&v| !(SCALE_MIN..=SCALE_MAX).contains(&v))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn header(names: impl Iterator<Item = String>) -> String {
        names.collect::<Vec<_>>().join(",")
    }

    #[test]
    fn test_twenty_columns_are_renamed() {
        let head = header((1..=20).map(|i| format!("Pregunta larga {i}")));
        let row = header((1..=20).map(|i| ((i % 5) + 1).to_string()));
        let csv = format!("{head}\n{row}\n");

        let table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.shape(), (1, 20));
        assert_eq!(table.column(QuestionId::new(1).unwrap()), vec![Some(2.0)]);
        assert_eq!(table.column(QuestionId::new(5).unwrap()), vec![Some(1.0)]);
        assert_eq!(table.missing_count(), 0);
    }

    #[test]
    fn test_named_columns_are_matched() {
        // Extra timestamp column in front, questions in reverse order
        let head = format!(
            "Marca temporal,{}",
            header((1..=20).rev().map(|i| format!("q{i}")))
        );
        let row = format!(
            "2024-05-01,{}",
            header((1..=20).rev().map(|i| if i == 20 { "5".to_string() } else { "3".to_string() }))
        );
        let csv = format!("{head}\n{row}\n");

        let table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.shape(), (1, 20));
        assert_eq!(table.column(QuestionId::new(20).unwrap()), vec![Some(5.0)]);
        assert_eq!(table.column(QuestionId::new(1).unwrap()), vec![Some(3.0)]);
    }

    #[test]
    fn test_missing_question_column() {
        let head = header((1..=19).map(|i| format!("Q{i}")));
        let csv = format!("Marca,Otra,{head}\n");

        let err = SurveyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingQuestion(ref q) if q == "Q20"));
    }

    #[test]
    fn test_invalid_cells_become_missing() {
        let head = header((1..=20).map(|i| format!("Q{i}")));
        let mut cells: Vec<String> = (0..20).map(|_| "4".to_string()).collect();
        cells[0] = "n/a".into();
        cells[1] = String::new();
        cells[2] = "NaN".into();
        cells[3] = " 2.5 ".into();
        let csv = format!("{head}\n{}\n", cells.join(","));

        let table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row[0], None);
        assert_eq!(row[1], None);
        assert_eq!(row[2], None);
        assert_eq!(row[3], Some(2.5));
        assert_eq!(table.missing_count(), 3);
        assert_eq!(table.coerced_count(), 3);
    }

    #[test]
    fn test_short_rows_are_padded_with_missing() {
        let head = header((1..=20).map(|i| format!("Q{i}")));
        let csv = format!("{head}\n5,5,5\n");

        let table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.shape(), (1, 20));
        assert_eq!(table.missing_count(), 17);
    }

    #[test]
    fn test_out_of_scale_values_are_kept() {
        let head = header((1..=20).map(|i| format!("Q{i}")));
        let row = header((1..=20).map(|i| if i == 1 { "7".to_string() } else { "3".to_string() }));
        let csv = format!("{head}\n{row}\n");

        let table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.row(0).unwrap()[0], Some(7.0));
        assert_eq!(table.out_of_scale_count(), 1);
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", header((1..=20).map(|i| format!("Q{i}")))).unwrap();
        for _ in 0..3 {
            writeln!(file, "{}", header((1..=20).map(|_| "4".to_string()))).unwrap();
        }

        let table = SurveyTable::from_path(file.path()).unwrap();
        assert_eq!(table.shape(), (3, 20));
        assert_eq!(table.cells().count(), 60);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SurveyTable::from_path(Path::new("/nonexistent/survey.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
