//! Revenue command - summary statistics over a revenue log.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use tracing::{debug, info};

use salesplan_core::models::revenue::{parse_amount, SummaryStats};
use salesplan_core::Revenue;

use super::{emit, load_config, OutputFormat};

/// Arguments for the revenue command.
#[derive(Args)]
pub struct RevenueArgs {
    /// Revenue log (.json array of {amount, date} or .csv with amount,date)
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct CsvRow {
    amount: String,
    date: String,
}

pub async fn run(args: RevenueArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let revenues = load_revenues(&args.input)?;
    for revenue in &revenues {
        revenue.validate()?;
    }
    info!("Loaded {} revenue entries", revenues.len());

    let stats = SummaryStats::from_revenues(&revenues)?;
    let currency = config.output.currency_symbol.as_str();

    let output = match OutputFormat::resolve(args.format, &config) {
        OutputFormat::Json => serde_json::to_string_pretty(&stats)?,
        OutputFormat::Csv => format_csv(&stats, currency)?,
        OutputFormat::Text => format_text(&stats, currency),
    };

    emit(&output, args.output.as_deref())
}

fn load_revenues(path: &Path) -> anyhow::Result<Vec<Revenue>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        "csv" => load_csv(path),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<Revenue>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut revenues = Vec::new();

    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let amount = parse_amount(&row.amount)
            .ok_or_else(|| anyhow::anyhow!("Row {}: invalid amount '{}'", line + 1, row.amount))?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Row {}: invalid date '{}': {}", line + 1, row.date, e))?;
        revenues.push(Revenue::new(amount, date));
    }

    debug!("Read {} rows from {}", revenues.len(), path.display());
    Ok(revenues)
}

fn format_csv(stats: &SummaryStats, currency: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["metric", "value"])?;
    for (label, value) in stats.rows(currency) {
        wtr.write_record([label, value.as_str()])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(stats: &SummaryStats, currency: &str) -> String {
    let mut output = format!("Записей: {}\n", stats.count);
    for (label, value) in stats.rows(currency) {
        output.push_str(&format!("{}: {}\n", label, value));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "amount,date").unwrap();
        writeln!(file, "\"1 500,50\",2024-05-01").unwrap();
        writeln!(file, "200,2024-05-02").unwrap();

        let revenues = load_revenues(file.path()).unwrap();
        assert_eq!(revenues.len(), 2);
        assert_eq!(revenues[0].amount, Decimal::new(150050, 2));
    }

    #[test]
    fn test_format_text() {
        let revenues = vec![Revenue::new(
            Decimal::new(1000, 0),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )];
        let text = format_text(&SummaryStats::from_revenues(&revenues).unwrap(), "₽");
        assert!(text.starts_with("Записей: 1\n"));
        assert!(text.contains("Общий доход: 1 000,00 ₽"));
    }
}
