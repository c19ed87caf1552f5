//! Excel export functionality
//!
//! Each sheet is first assembled as a [`SheetTable`] so its shape and
//! contents can be inspected without reading the workbook back, then written
//! with `rust_xlsxwriter`.

use anyhow::{Context, Result};
use rust_xlsxwriter::*;
use std::path::Path;
use tracing::debug;
use usability_survey_core::stats::round_to;
use usability_survey_core::{HeuristicStats, QuestionId, SurveyAnalysis, SurveyTable};

use crate::summary::Fixed;

/// Sheet with per-question means
pub const QUESTIONS_SHEET: &str = "Promedio por Pregunta";
/// Sheet with per-heuristic means in the short format
pub const HEURISTICS_SHEET: &str = "Promedio por Heurística";
/// Sheet with the detailed heuristic analysis
pub const DETAIL_SHEET: &str = "Análisis Detallado";
/// Sheet with the executive summary
pub const SUMMARY_SHEET: &str = "Resumen Ejecutivo";
/// Sheet with the raw responses
pub const RAW_DATA_SHEET: &str = "Datos Brutos";

const ROUNDING: i32 = 4;

/// Value of one worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text value
    Text(String),
    /// Numeric value; NaN is written as a blank cell
    Number(f64),
    /// Blank cell
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// In-memory worksheet: a header row followed by data rows
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Worksheet name
    pub name: &'static str,
    /// Header row
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in characters
    pub widths: Vec<f64>,
}

impl SheetTable {
    fn new(name: &'static str, headers: &[&str], widths: &[f64]) -> Self {
        Self {
            name,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            widths: widths.to_vec(),
        }
    }

    /// `(data rows, columns)`, header excluded
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }
}

/// Writes the survey workbook
pub struct ExcelExporter;

impl ExcelExporter {
    /// Export the analysis and raw responses to a five-sheet workbook
    pub fn export(table: &SurveyTable, analysis: &SurveyAnalysis, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for sheet_table in Self::build_sheets(table, analysis) {
            let sheet = workbook.add_worksheet();
            sheet.set_name(sheet_table.name)?;
            Self::write_sheet(sheet, &sheet_table, &bold)
                .with_context(|| format!("Failed to write sheet: {}", sheet_table.name))?;
            debug!(sheet = sheet_table.name, rows = sheet_table.rows.len(), "Sheet written");
        }

        workbook.save(path)?;
        Ok(())
    }

    /// All sheets in workbook order
    pub fn build_sheets(table: &SurveyTable, analysis: &SurveyAnalysis) -> Vec<SheetTable> {
        vec![
            Self::questions_sheet(analysis),
            Self::heuristics_sheet(analysis),
            Self::detail_sheet(analysis),
            Self::summary_sheet(analysis),
            Self::raw_data_sheet(table),
        ]
    }

    fn questions_sheet(analysis: &SurveyAnalysis) -> SheetTable {
        let mut sheet = SheetTable::new(
            QUESTIONS_SHEET,
            &["Pregunta", "Promedio", "Desviación Estándar"],
            &[12.0, 12.0, 20.0],
        );
        for q in &analysis.questions {
            sheet.rows.push(vec![
                Cell::text(q.question.label()),
                Cell::Number(round_to(q.mean, ROUNDING)),
                Cell::Number(round_to(q.std_dev, ROUNDING)),
            ]);
        }
        sheet
    }

    fn heuristics_sheet(analysis: &SurveyAnalysis) -> SheetTable {
        let mut sheet = SheetTable::new(
            HEURISTICS_SHEET,
            &["Heurística", "Pregunta_1", "Pregunta_2", "Promedio"],
            &[15.0, 12.0, 12.0, 12.0],
        );
        for h in &analysis.heuristics {
            sheet.rows.push(vec![
                Cell::text(h.label.clone()),
                Cell::text(h.questions.0.label()),
                Cell::text(h.questions.1.label()),
                Cell::Number(round_to(h.mean, ROUNDING)),
            ]);
        }
        sheet
    }

    fn detail_sheet(analysis: &SurveyAnalysis) -> SheetTable {
        let mut sheet = SheetTable::new(
            DETAIL_SHEET,
            &[
                "Heurística_ID",
                "Heurística",
                "Preguntas",
                "Promedio",
                "Desviación",
                "Fortaleza",
            ],
            &[14.0, 30.0, 12.0, 12.0, 12.0, 12.0],
        );
        for h in &analysis.heuristics {
            sheet.rows.push(vec![
                Cell::Number(h.id as f64),
                Cell::text(h.name.clone()),
                Cell::text(h.questions_label()),
                Cell::Number(h.mean),
                Cell::Number(h.std_dev),
                Cell::text(h.strength.label()),
            ]);
        }
        sheet
    }

    fn summary_sheet(analysis: &SurveyAnalysis) -> SheetTable {
        let mut sheet = SheetTable::new(SUMMARY_SHEET, &["Métrica", "Valor"], &[20.0, 30.0]);
        let global = &analysis.global;
        let heuristic_name =
            |h: Option<&HeuristicStats>| h.map(|h| h.name.clone()).unwrap_or_default();

        let metrics = [
            ("Puntuación Global", format!("{}/5.0", Fixed(global.mean, 2))),
            ("Porcentaje", format!("{}%", Fixed(global.percentage, 1))),
            ("Nivel", global.level.label().to_string()),
            ("Mejor Heurística", heuristic_name(analysis.best_heuristic())),
            ("Peor Heurística", heuristic_name(analysis.worst_heuristic())),
        ];
        for (metric, value) in metrics {
            sheet.rows.push(vec![Cell::text(metric), Cell::text(value)]);
        }
        sheet
    }

    fn raw_data_sheet(table: &SurveyTable) -> SheetTable {
        let headers: Vec<String> = QuestionId::all().map(|q| q.label()).collect();
        let widths = vec![6.0; headers.len()];
        let rows = table
            .rows()
            .iter()
            .map(|row| row.iter().map(|&v| Cell::from(v)).collect())
            .collect();
        SheetTable {
            name: RAW_DATA_SHEET,
            headers,
            rows,
            widths,
        }
    }

    fn write_sheet(sheet: &mut Worksheet, table: &SheetTable, bold: &Format) -> Result<()> {
        // Headers
        for (col, header) in table.headers.iter().enumerate() {
            sheet.write_with_format(0, col as u16, header.as_str(), bold)?;
        }

        // Data rows
        for (idx, cells) in table.rows.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => {
                        sheet.write(row, col, text.as_str())?;
                    }
                    Cell::Number(value) if value.is_finite() => {
                        sheet.write(row, col, *value)?;
                    }
                    Cell::Number(_) | Cell::Empty => {}
                }
            }
        }

        // Set column widths
        for (col, width) in table.widths.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use usability_survey_core::{Row, Thresholds, QUESTION_COUNT};

    fn sample_table() -> SurveyTable {
        let mut rows: Vec<Row> = (0..7)
            .map(|r| {
                let mut row = [None; QUESTION_COUNT];
                for (q, cell) in row.iter_mut().enumerate() {
                    *cell = Some(((r * 3 + q) % 5 + 1) as f64);
                }
                row
            })
            .collect();
        rows[2][4] = None;
        SurveyTable::from_rows(rows)
    }

    fn sheets() -> (SurveyTable, Vec<SheetTable>) {
        let table = sample_table();
        let analysis = SurveyAnalysis::compute(&table, &Thresholds::default());
        let sheets = ExcelExporter::build_sheets(&table, &analysis);
        (table, sheets)
    }

    #[test]
    fn test_sheet_names_and_order() {
        let (_, sheets) = sheets();
        let names: Vec<&str> = sheets.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Promedio por Pregunta",
                "Promedio por Heurística",
                "Análisis Detallado",
                "Resumen Ejecutivo",
                "Datos Brutos",
            ]
        );
    }

    #[test]
    fn test_raw_data_matches_table_shape() {
        let (table, sheets) = sheets();
        let raw = &sheets[4];
        assert_eq!(raw.shape(), table.shape());
        assert_eq!(raw.headers[0], "Q1");
        assert_eq!(raw.headers[19], "Q20");
        assert_eq!(raw.rows[2][4], Cell::Empty);
        assert_eq!(raw.rows[0][0], Cell::Number(1.0));
    }

    #[test]
    fn test_every_row_is_as_wide_as_its_header() {
        let (_, sheets) = sheets();
        for sheet in &sheets {
            assert_eq!(sheet.widths.len(), sheet.headers.len(), "{}", sheet.name);
            assert!(
                sheet.rows.iter().all(|r| r.len() == sheet.headers.len()),
                "{}",
                sheet.name
            );
        }
    }

    #[test]
    fn test_stat_sheet_shapes() {
        let (_, sheets) = sheets();
        assert_eq!(sheets[0].shape(), (20, 3));
        assert_eq!(sheets[1].shape(), (10, 4));
        assert_eq!(sheets[2].shape(), (10, 6));
        assert_eq!(sheets[3].shape(), (5, 2));
    }

    #[test]
    fn test_heuristic_rows() {
        let (_, sheets) = sheets();
        let short = &sheets[1].rows[9];
        assert_eq!(short[0], Cell::Text("Heurística 10".into()));
        assert_eq!(short[1], Cell::Text("Q19".into()));
        assert_eq!(short[2], Cell::Text("Q20".into()));

        let detail = &sheets[2].rows[0];
        assert_eq!(detail[0], Cell::Number(1.0));
        assert_eq!(detail[1], Cell::Text("1. Visibilidad del Estado".into()));
        assert_eq!(detail[2], Cell::Text("Q1, Q2".into()));
    }

    #[test]
    fn test_summary_sheet() {
        let mut row = [Some(5.0); QUESTION_COUNT];
        row[0] = Some(3.0);
        row[1] = Some(3.0);
        let table = SurveyTable::from_rows(vec![row]);
        let analysis = SurveyAnalysis::compute(&table, &Thresholds::default());
        let sheets = ExcelExporter::build_sheets(&table, &analysis);
        let summary = &sheets[3];

        let values: Vec<&Cell> = summary.rows.iter().map(|r| &r[1]).collect();
        assert_eq!(values[0], &Cell::Text("4.80/5.0".into()));
        assert_eq!(values[1], &Cell::Text("96.0%".into()));
        assert_eq!(values[2], &Cell::Text("Excelente".into()));
        assert_eq!(values[3], &Cell::Text("2. Lenguaje Familiar".into()));
        assert_eq!(values[4], &Cell::Text("1. Visibilidad del Estado".into()));
    }

    #[test]
    fn test_question_values_are_rounded() {
        let mut rows = vec![[Some(4.0); QUESTION_COUNT]; 3];
        rows[0][0] = Some(5.0);
        let table = SurveyTable::from_rows(rows);
        let analysis = SurveyAnalysis::compute(&table, &Thresholds::default());
        let sheets = ExcelExporter::build_sheets(&table, &analysis);

        // (5 + 4 + 4) / 3 = 4.3333...
        assert_eq!(sheets[0].rows[0][1], Cell::Number(4.3333));
    }

    #[test]
    fn test_rounding_ties_match_console() {
        // 32 respondents: (5 + 31 * 4) / 32 = 4.03125, an exact tie at 4 decimals
        let mut rows = vec![[Some(4.0); QUESTION_COUNT]; 32];
        rows[0][0] = Some(5.0);
        let table = SurveyTable::from_rows(rows);
        let analysis = SurveyAnalysis::compute(&table, &Thresholds::default());
        let sheets = ExcelExporter::build_sheets(&table, &analysis);

        assert_eq!(sheets[0].rows[0][1], Cell::Number(4.0312));
        let console = crate::SummaryPrinter::render(&analysis).unwrap();
        assert!(console.contains("Q1: 4.0312\n"));
    }

    #[test]
    fn test_export_writes_xlsx() {
        let table = sample_table();
        let analysis = SurveyAnalysis::compute(&table, &Thresholds::default());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Reporte_Usabilidad_Completo.xlsx");

        ExcelExporter::export(&table, &analysis, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
        // Zip entry names are stored uncompressed; one part per sheet
        let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"xl/worksheets/sheet5.xml"));
        assert!(!contains(b"xl/worksheets/sheet6.xml"));
    }
}
