//! Process command - extract fields and suggest a price band for one file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use rfq_core::{
    suggest_price_band, AutoDecoder, ExtractedFields, FieldsExtractor, PriceSuggestion,
    PricingInput, RfqExtractor, TextDecoder,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only extract fields, skip the price band
    #[arg(long)]
    no_suggest: bool,
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

/// Result of processing a single file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    pub filename: String,
    pub extracted: ExtractedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<PriceSuggestion>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Validates the config file even though processing is stateless
    load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let text = AutoDecoder.decode(&data)?;
    debug!("Decoded {} chars", text.len());

    let extracted = RfqExtractor::new().extract(&text);
    let suggestion =
        (!args.no_suggest).then(|| suggest_price_band(&PricingInput::from(&extracted)));

    let report = ProcessReport {
        filename: args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extracted,
        suggestion,
    };

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_report(report: &ProcessReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ProcessReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "filename",
        "nsn",
        "quantity",
        "delivery_days",
        "description",
        "confidence_score",
        "price_low",
        "price_high",
        "confidence_percent",
    ])?;

    let fields = &report.extracted;
    let suggestion = report.suggestion.as_ref();
    wtr.write_record([
        report.filename.clone(),
        fields.nsn.clone().unwrap_or_default(),
        optional(fields.quantity),
        optional(fields.delivery_days),
        fields.description.clone().unwrap_or_default(),
        fields.confidence_score.to_string(),
        optional(suggestion.map(|s| s.price_low)),
        optional(suggestion.map(|s| s.price_high)),
        optional(suggestion.map(|s| s.confidence_percent)),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn format_fields(fields: &ExtractedFields) -> String {
    let mut output = String::new();
    let missing = || "-".to_string();

    output.push_str(&format!("NSN:         {}\n", fields.nsn.clone().unwrap_or_else(missing)));
    output.push_str(&format!(
        "Quantity:    {}\n",
        fields.quantity.map(|q| q.to_string()).unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Delivery:    {}\n",
        fields
            .delivery_days
            .map(|d| format!("{} days", d))
            .unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Description: {}\n",
        fields.description.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Confidence:  {:.0}%\n",
        fields.confidence_score * 100.0
    ));
    output
}

pub(crate) fn format_suggestion(suggestion: &PriceSuggestion) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Price band:  {} - {}\n",
        suggestion.price_low, suggestion.price_high
    ));
    output.push_str(&format!("Confidence:  {}%\n", suggestion.confidence_percent));
    output.push_str("Rationale:\n");
    for reason in &suggestion.rationale {
        output.push_str(&format!("  - {}\n", reason));
    }
    output
}

fn format_text(report: &ProcessReport) -> String {
    let mut output = format!("File: {}\n\n", report.filename);
    output.push_str(&format_fields(&report.extracted));
    if let Some(suggestion) = &report.suggestion {
        output.push('\n');
        output.push_str(&format_suggestion(suggestion));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ProcessReport {
        let extracted = RfqExtractor::new()
            .extract("NSN 1234-56-789-0123 QTY: 10 delivery: 5 days Precision repair");
        let suggestion = suggest_price_band(&PricingInput::from(&extracted));
        ProcessReport {
            filename: "rfq.txt".to_string(),
            extracted,
            suggestion: Some(suggestion),
        }
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let csv = format_csv(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("filename,nsn,quantity"));
        assert!(lines[1].starts_with("rfq.txt,1234-56-789-0123,10,5,"));
        assert!(lines[1].ends_with(",869,1063,95"));
    }

    #[test]
    fn test_text_summary() {
        let text = format_text(&report());
        assert!(text.contains("NSN:         1234-56-789-0123"));
        assert!(text.contains("Price band:  869 - 1063"));
        assert!(text.contains("  - Tight delivery increased cost"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = format_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["extracted"]["deliveryDays"], 5);
        assert_eq!(value["suggestion"]["priceHigh"], 1063);
    }
}
