//! Match command - suggest plan fields for one token batch.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use salesplan_core::matching::{is_numeric, load_tokens};
use salesplan_core::{FieldMatcher, Mapping, Token};

use super::{emit, load_config, resolve_catalog, OutputFormat};

/// Arguments for the match command.
#[derive(Args)]
pub struct MatchArgs {
    /// Token file (JSON array of strings or OCR word records)
    #[arg(required = true)]
    input: PathBuf,

    /// Restrict matching to these field keys (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also list tokens that were not matched
    #[arg(long)]
    show_rejected: bool,
}

pub async fn run(args: MatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Matching tokens from {}", args.input.display());

    let tokens = load_tokens(&args.input)?;
    let catalog = resolve_catalog(&args.fields, &config)?;
    let matcher = FieldMatcher::new(catalog);

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    let mapping = matcher.suggest(&texts);

    let format = OutputFormat::resolve(args.format, &config);
    let output = format_mapping(&mapping, format)?;
    emit(&output, args.output.as_deref())?;

    if args.show_rejected {
        print_rejected(&tokens, &mapping, &matcher);
    }

    debug!("Total matching time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_mapping(mapping: &Mapping, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(mapping)?),
        OutputFormat::Csv => format_csv(mapping),
        OutputFormat::Text => Ok(format_text(mapping)),
    }
}

fn format_csv(mapping: &Mapping) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["token", "field", "similarity"])?;
    for m in mapping.iter() {
        wtr.write_record([&m.token, &m.field, &format!("{:.3}", m.similarity)])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(mapping: &Mapping) -> String {
    if mapping.is_empty() {
        return "No tokens matched a plan field.".to_string();
    }

    let width = mapping
        .iter()
        .map(|m| m.token.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for m in mapping.iter() {
        let pad = width - m.token.chars().count();
        output.push_str(&format!(
            "{}{} -> {} ({:.0}%)\n",
            m.token,
            " ".repeat(pad),
            m.field,
            m.similarity * 100.0
        ));
    }
    output
}

fn print_rejected(tokens: &[Token], mapping: &Mapping, matcher: &FieldMatcher) {
    let rejected: Vec<&Token> = tokens
        .iter()
        .filter(|t| !is_numeric(&t.text) && !mapping.contains(&t.text))
        .collect();

    if rejected.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", style("Unmatched tokens:").yellow());
    for token in rejected {
        match matcher.best_match(&token.text) {
            Some((field, score)) => eprintln!(
                "  - {} (closest: {}, {:.0}%)",
                token.text,
                field,
                score * 100.0
            ),
            None => eprintln!("  - {}", token.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesplan_core::{suggest_mappings, FieldCatalog};

    #[test]
    fn test_format_csv() {
        let mapping = suggest_mappings(&["GSM", "Smrt"], &FieldCatalog::plan_fields());
        let csv = format_mapping(&mapping, OutputFormat::Csv).unwrap();
        assert_eq!(csv, "token,field,similarity\nGSM,gsm,1.000\nSmrt,smart,0.800\n");
    }

    #[test]
    fn test_format_text() {
        let mapping = suggest_mappings(&["GSM", "Фото"], &FieldCatalog::plan_fields());
        let text = format_mapping(&mapping, OutputFormat::Text).unwrap();
        assert_eq!(text, "GSM  -> gsm (100%)\nФото -> photo (100%)\n");
    }
}
