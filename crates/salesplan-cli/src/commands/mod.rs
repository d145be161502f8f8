//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod confirm;
pub mod fields;
pub mod revenue;
pub mod stores;
pub mod suggest;

use std::path::{Path, PathBuf};

use tracing::debug;

use salesplan_core::models::config::{OutputKind, SalesPlanConfig};
use salesplan_core::FieldCatalog;

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Explicit choice, or the configured default.
    pub fn resolve(choice: Option<OutputFormat>, config: &SalesPlanConfig) -> OutputFormat {
        choice.unwrap_or(match config.output.default_format {
            OutputKind::Json => OutputFormat::Json,
            OutputKind::Csv => OutputFormat::Csv,
            OutputKind::Text => OutputFormat::Text,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("salesplan")
        .join("config.json")
}

/// Load the config named on the command line, else the default file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SalesPlanConfig> {
    let config = match config_path {
        Some(path) => SalesPlanConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Using config at {}", default_path.display());
                SalesPlanConfig::from_file(&default_path)?
            } else {
                SalesPlanConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// Catalog from a `--fields` list, falling back to the configured one.
pub fn resolve_catalog(
    fields: &[String],
    config: &SalesPlanConfig,
) -> anyhow::Result<FieldCatalog> {
    if fields.is_empty() {
        return Ok(config.catalog.catalog()?);
    }

    let mut catalog_config = config.catalog.clone();
    catalog_config.fields = fields.to_vec();
    Ok(catalog_config.catalog()?)
}

/// Write output to a file, or print it.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}
