//! Batch processing command for multiple booking files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use reserva_core::export::{write_csv, write_csv_file};
use reserva_core::{BatchDriver, BatchReport, BookingField, BookingParser, Document, PdfExtractor};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a per-document summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Exit with an error when any document failed
    #[arg(long)]
    fail_on_error: bool,
}

/// Outcome of a single file, for the summary.
struct FileOutcome {
    document: String,
    reference: String,
    ages: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let driver = BatchDriver::new(BookingParser::from_config(&config));
    let mut extractor = PdfExtractor::with_config(&config.pdf);
    let mut report = BatchReport::new();
    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let file_start = Instant::now();
        let name = display_name(path);

        let outcome = match Document::from_path(path) {
            Ok(document) => match driver.process(&mut extractor, &document, &mut report) {
                Some(mapping) => FileOutcome {
                    document: name,
                    reference: mapping.get(BookingField::Reference).to_string(),
                    ages: mapping.ages().len(),
                    error: None,
                    processing_time_ms: 0,
                },
                None => failed(name, &report),
            },
            Err(e) => {
                report.record_failure(name.as_str(), e);
                failed(name, &report)
            }
        };

        outcomes.push(FileOutcome {
            processing_time_ms: file_start.elapsed().as_millis() as u64,
            ..outcome
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    match &args.output {
        Some(path) => {
            write_csv_file(&report.table, path)?;
            eprintln!(
                "{} Results written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => write_csv(&report.table, io::stdout().lock(), false)?,
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.processed(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(report.table.len()).green(),
        style(report.diagnostics.len()).red()
    );

    if report.has_failures() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for diagnostic in &report.diagnostics {
            eprintln!("  - {}: {}", diagnostic.document, diagnostic.error);
        }

        if args.fail_on_error {
            anyhow::bail!("{} document(s) failed", report.diagnostics.len());
        }
    }

    Ok(())
}

fn failed(document: String, report: &BatchReport) -> FileOutcome {
    FileOutcome {
        document,
        reference: String::new(),
        ages: 0,
        error: report.diagnostics.last().map(|d| d.error.clone()),
        processing_time_ms: 0,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// PDF files in a directory (non-recursive) or matching a glob pattern,
/// sorted by path.
fn collect_inputs(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let root = Path::new(input);

    let mut files: Vec<PathBuf> = if root.is_dir() {
        debug!("Scanning directory {}", root.display());
        fs::read_dir(root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_pdf(p))
            .collect()
    } else {
        glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| is_pdf(p))
            .collect()
    };

    files.sort();
    Ok(files)
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "reference",
        "ages",
        "processing_time_ms",
        "error",
    ])?;

    for outcome in outcomes {
        let status = if outcome.error.is_some() { "error" } else { "success" };
        wtr.write_record([
            outcome.document.as_str(),
            status,
            outcome.reference.as_str(),
            &outcome.ages.to_string(),
            &outcome.processing_time_ms.to_string(),
            outcome.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
