//! CLI argument parsing and report pipeline

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use usability_survey_core::{ReportConfig, SurveyAnalysis, SurveyTable, DEFAULT_CSV_PATH};
use usability_survey_report::{render_charts, ExcelExporter, JsonExporter, SummaryPrinter};

#[derive(Parser)]
#[command(name = "usability-survey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Survey responses exported as CSV
    #[arg(default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,

    /// Directory that receives the charts, workbook and JSON summary
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Skip the Excel workbook
    #[arg(long)]
    pub no_excel: bool,

    /// Also write a JSON summary
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Report configuration for these arguments
    pub fn config(&self) -> ReportConfig {
        ReportConfig::new(&self.csv_path)
            .with_output_dir(&self.output_dir)
            .with_charts(!self.no_charts)
            .with_excel(!self.no_excel)
            .with_json(self.json)
    }
}

/// Run the full analysis and write every enabled output
pub fn run(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let stdout = io::stdout();
    run_with(config, &mut stdout.lock())
}

/// Same as [`run`], printing the console report to `out`
pub fn run_with<W: Write>(config: &ReportConfig, out: &mut W) -> Result<Vec<PathBuf>> {
    config.validate().context("Invalid report configuration")?;

    writeln!(out, "🚀 INICIANDO ANÁLISIS COMPLETO DE USABILIDAD...")?;

    let table = SurveyTable::from_path(config.input())
        .with_context(|| format!("Failed to load survey: {}", config.input().display()))?;
    if table.is_empty() {
        warn!("Survey has no responses; every score will be undefined");
    }

    let analysis = SurveyAnalysis::compute(&table, &config.thresholds);
    debug!(
        respondents = analysis.respondents,
        global = analysis.global.mean,
        "Analysis computed"
    );

    SummaryPrinter::write(&analysis, &mut *out).context("Failed to print summary")?;

    let mut generated = Vec::new();

    if config.charts {
        let charts_dir = config.charts_path();
        let charts = render_charts(&analysis, &charts_dir)?;
        writeln!(out)?;
        writeln!(
            out,
            "📊 Gráficos generados en la carpeta '{}/'",
            config.charts_dir
        )?;
        generated.extend(charts);
    } else {
        info!("Chart rendering skipped");
    }

    if config.excel {
        let path = config.workbook_path();
        ExcelExporter::export(&table, &analysis, &path)
            .with_context(|| format!("Failed to write workbook: {}", path.display()))?;
        writeln!(out)?;
        writeln!(out, "💾 Reporte Excel guardado: '{}'", path.display())?;
        if config.charts {
            writeln!(
                out,
                "📊 Gráficos guardados en carpeta: '{}/'",
                config.charts_dir
            )?;
        }
        generated.push(path);
    } else {
        info!("Excel workbook skipped");
    }

    if config.json {
        let path = config.json_path();
        JsonExporter::export(&analysis, config, &path)
            .with_context(|| format!("Failed to write JSON summary: {}", path.display()))?;
        writeln!(out, "🗂️  Resumen JSON guardado: '{}'", path.display())?;
        generated.push(path);
    }

    writeln!(out)?;
    writeln!(out, "✅ ANÁLISIS COMPLETADO EXITOSAMENTE!")?;
    if !generated.is_empty() {
        writeln!(out, "📁 Archivos generados:")?;
        for path in &generated {
            writeln!(out, "   • {}", path.display())?;
        }
    }

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["usability-survey"]);
        assert_eq!(cli.csv_path, PathBuf::from("Preguntas Nielsen (respuestas).csv"));

        let config = cli.config();
        assert!(config.charts);
        assert!(config.excel);
        assert!(!config.json);
        assert_eq!(config.workbook_path(), PathBuf::from("./Reporte_Usabilidad_Completo.xlsx"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "usability-survey",
            "datos.csv",
            "--output-dir",
            "salida",
            "--no-charts",
            "--json",
            "-v",
        ]);
        let config = cli.config();

        assert!(cli.verbose);
        assert_eq!(config.input(), PathBuf::from("datos.csv").as_path());
        assert!(!config.charts);
        assert!(config.excel);
        assert_eq!(config.json_path(), PathBuf::from("salida/resumen_usabilidad.json"));
    }

    #[test]
    fn test_run_writes_outputs_without_charts() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("respuestas.csv");
        let header: Vec<String> = (1..=20).map(|i| format!("Q{}", i)).collect();
        let mut body = header.join(",") + "\n";
        for r in 0..4 {
            let row: Vec<String> = (0..20).map(|q| ((r * q) % 5 + 1).to_string()).collect();
            body.push_str(&(row.join(",") + "\n"));
        }
        fs::write(&csv, body).unwrap();

        let config = ReportConfig::new(&csv)
            .with_output_dir(dir.path())
            .with_charts(false)
            .with_json(true);
        let mut console = Vec::new();
        let generated = run_with(&config, &mut console).unwrap();

        assert_eq!(generated.len(), 2);
        assert!(generated.iter().all(|p| p.exists()));
        assert!(!dir.path().join("graficos").exists());

        let console = String::from_utf8(console).unwrap();
        let workbook = dir.path().join("Reporte_Usabilidad_Completo.xlsx");
        assert!(console.starts_with("🚀 INICIANDO ANÁLISIS COMPLETO DE USABILIDAD...\n"));
        assert!(console.contains(&format!("💾 Reporte Excel guardado: '{}'\n", workbook.display())));
        assert!(!console.contains("📊 Gráficos"));
        assert!(console.contains(&format!("   • {}\n", workbook.display())));
    }

    #[test]
    fn test_run_prints_summary_and_file_list() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("respuestas.csv");
        let header: Vec<String> = (1..=20).map(|i| format!("Q{}", i)).collect();
        fs::write(&csv, header.join(",") + "\n" + &vec!["4"; 20].join(",") + "\n").unwrap();

        let config = ReportConfig::new(&csv)
            .with_output_dir(dir.path())
            .with_charts(false);
        let mut console = Vec::new();
        run_with(&config, &mut console).unwrap();
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Q1: 4.0000\n"));
        assert!(console.contains("✅ ANÁLISIS COMPLETADO EXITOSAMENTE!\n📁 Archivos generados:\n"));
    }

    #[test]
    fn test_run_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig::new(dir.path().join("nope.csv")).with_output_dir(dir.path());

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to load survey"));
    }
}
