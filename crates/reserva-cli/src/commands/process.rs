//! Process command - extract fields from a single booking PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use reserva_core::booking::rules::parse_booking_date;
use reserva_core::error::ExtractionError;
use reserva_core::export::to_csv_string;
use reserva_core::{
    BookingField, BookingParser, FieldMapping, NormalizedText, PdfExtractor, ResultTable,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print only this field (e.g. "Hotel", "Age 1")
    #[arg(long)]
    field: Option<String>,

    /// Show which rule produced each field
    #[arg(long)]
    show_rules: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading PDF...");
    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::with_config(&config.pdf);

    pb.set_message("Extracting text...");
    let doc = NormalizedText::from_document(&mut extractor, &data, &config.pdf)?;
    debug!("Normalized text has {} lines", doc.lines().len());

    pb.set_message("Extracting booking fields...");
    let parser = BookingParser::from_config(&config);
    let result = parser.parse_detailed(&doc);

    pb.finish_and_clear();

    let output = match &args.field {
        Some(name) => format!("{}\n", field_value(&result.mapping, name)?),
        None => format_mapping(&result.mapping, args.format)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.show_rules {
        println!();
        for hit in &result.rules {
            println!(
                "{} {}: {} {}",
                style("ℹ").blue(),
                hit.field,
                hit.rule,
                style(format!("({})", hit.source.trim())).dim()
            );
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Value of one column; an age column past the last age is empty.
fn field_value(mapping: &FieldMapping, name: &str) -> anyhow::Result<String> {
    if let Some(value) = mapping.get_by_name(name) {
        return Ok(value.to_string());
    }
    if name.trim().starts_with(mapping.age_prefix()) {
        return Ok(String::new());
    }
    Err(ExtractionError::UnknownField(name.to_string()).into())
}

fn format_mapping(mapping: &FieldMapping, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(mapping)?)),
        OutputFormat::Csv => {
            let mut table = ResultTable::new();
            table.push(mapping.clone());
            Ok(to_csv_string(&table)?)
        }
        OutputFormat::Text => Ok(format_text(mapping)),
    }
}

fn format_text(mapping: &FieldMapping) -> String {
    let mut output = String::new();

    for field in BookingField::ALL {
        let value = mapping.get(field);
        if value.is_empty() {
            continue;
        }

        let is_date = matches!(field, BookingField::CreationDate | BookingField::ServiceDate);
        match parse_booking_date(value).filter(|_| is_date) {
            Some(date) => output.push_str(&format!("{}: {} ({})\n", field, value, date)),
            None => output.push_str(&format!("{}: {}\n", field, value)),
        }
    }

    if !mapping.ages().is_empty() {
        output.push_str(&format!("Edades: {}\n", mapping.ages().join(", ")));
    }

    if output.is_empty() {
        output.push_str("No booking fields found\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldMapping {
        let mut mapping = FieldMapping::new("Age");
        mapping.set(BookingField::Reference, "123-45");
        mapping.set(BookingField::ServiceDate, "05-ENE.-25");
        mapping.push_age("34");
        mapping
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample());
        assert!(text.contains("Número Ref: 123-45\n"));
        assert!(text.contains("Fecha Servicio: 05-ENE.-25 (2025-01-05)\n"));
        assert!(text.contains("Edades: 34\n"));
        assert!(!text.contains("Hotel"));
    }

    #[test]
    fn test_format_text_empty() {
        assert_eq!(format_text(&FieldMapping::new("Age")), "No booking fields found\n");
    }

    #[test]
    fn test_field_value() {
        let mapping = sample();
        assert_eq!(field_value(&mapping, "Número Ref").unwrap(), "123-45");
        assert_eq!(field_value(&mapping, "Age 1").unwrap(), "34");
        assert_eq!(field_value(&mapping, "Age 5").unwrap(), "");
        assert!(field_value(&mapping, "Precio").is_err());
    }
}
