//! Config command - inspect and edit the salesplan config file.
//!
//! Every subcommand works on the file named by the global `-c/--config`
//! flag, falling back to the per-user default location.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use salesplan_core::models::config::PairingPolicy;
use salesplan_core::SalesPlanConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration and the catalog it selects
    Show,

    /// Write a new configuration file
    Init(InitArgs),

    /// Print one value by dotted key (e.g. "review.low_confidence")
    Get { key: String },

    /// Change one value by dotted key. Lists take comma separated items.
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Plan field keys to match against (comma separated, default: all)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Which value to keep when several follow one label
    #[arg(long, value_parser = parse_pairing)]
    pairing: Option<PairingPolicy>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

fn parse_pairing(s: &str) -> Result<PairingPolicy, String> {
    match s.to_lowercase().as_str() {
        "first" => Ok(PairingPolicy::First),
        "last" => Ok(PairingPolicy::Last),
        other => Err(format!("expected 'first' or 'last', got '{}'", other)),
    }
}

/// The config file a subcommand reads and writes.
struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    fn resolve(config_path: Option<&str>) -> Self {
        let path = config_path.map_or_else(default_config_path, PathBuf::from);
        debug!("Config file: {}", path.display());
        Self { path }
    }

    fn load(&self) -> anyhow::Result<SalesPlanConfig> {
        if self.path.exists() {
            Ok(SalesPlanConfig::from_file(&self.path)?)
        } else {
            Ok(SalesPlanConfig::default())
        }
    }

    fn save(&self, config: &SalesPlanConfig) -> anyhow::Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        config.save(&self.path)?;
        Ok(())
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = ConfigFile::resolve(config_path);
    match args.command {
        ConfigCommand::Show => show(&file),
        ConfigCommand::Init(init) => init_file(&file, init),
        ConfigCommand::Get { key } => get(&file, &key),
        ConfigCommand::Set { key, value } => set(&file, &key, &value),
        ConfigCommand::Path => path(&file.path),
    }
}

fn show(file: &ConfigFile) -> anyhow::Result<()> {
    if !file.path.exists() {
        eprintln!("{} {} not found, showing defaults.", style("ℹ").blue(), file.path.display());
    }
    let config = file.load()?;
    let catalog = config.catalog.catalog()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    eprintln!(
        "{} Matching against {} fields: {}",
        style("ℹ").blue(),
        catalog.len(),
        catalog.keys().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

fn init_file(file: &ConfigFile, args: InitArgs) -> anyhow::Result<()> {
    if file.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            file.path.display()
        );
    }

    let mut config = SalesPlanConfig::default();
    config.catalog.fields = args.fields;
    if let Some(pairing) = args.pairing {
        config.review.pairing = pairing;
    }
    file.save(&config)?;

    println!("{} Created {}", style("✓").green(), file.path.display());
    Ok(())
}

/// `review.low_confidence` -> `/review/low_confidence`
fn pointer(key: &str) -> String {
    key.split('.').fold(String::new(), |mut acc, part| {
        acc.push('/');
        acc.push_str(part);
        acc
    })
}

fn get(file: &ConfigFile, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(file.load()?)?;
    let value = json
        .pointer(&pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    match value {
        Value::String(s) => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

/// Interpret a command-line value in the shape of the value it replaces.
fn coerce(current: &Value, raw: &str) -> Value {
    if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
        if std::mem::discriminant(&parsed) == std::mem::discriminant(current) {
            return parsed;
        }
    }
    match current {
        Value::Array(_) => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        _ => Value::String(raw.to_string()),
    }
}

fn set(file: &ConfigFile, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(file.load()?)?;
    let slot = json
        .pointer_mut(&pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }

    let value = coerce(slot, raw);
    *slot = value.clone();

    let config: SalesPlanConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    file.save(&config)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn path(path: &Path) -> anyhow::Result<()> {
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "{} not created yet, run 'salesplan config init'",
            style("ℹ").yellow()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pointer() {
        assert_eq!(pointer("review.low_confidence"), "/review/low_confidence");
        assert_eq!(pointer("output"), "/output");
    }

    #[test]
    fn test_coerce_follows_current_shape() {
        assert_eq!(coerce(&json!(60.0), "45"), json!(45));
        assert_eq!(coerce(&json!("first"), "last"), json!("last"));
        assert_eq!(coerce(&json!([]), "gsm, sim"), json!(["gsm", "sim"]));
        assert_eq!(coerce(&json!([]), r#"["vp"]"#), json!(["vp"]));
    }

    #[test]
    fn test_set_rejects_unknown_catalog_field() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile {
            path: dir.path().join("config.json"),
        };

        set(&file, "catalog.fields", "gsm,sim").unwrap();
        assert_eq!(file.load().unwrap().catalog.fields, vec!["gsm", "sim"]);

        assert!(set(&file, "catalog.fields", "gsm,bonus").is_err());
        assert_eq!(file.load().unwrap().catalog.fields, vec!["gsm", "sim"]);

        assert!(set(&file, "review", "1").is_err());
        assert!(set(&file, "review.nope", "1").is_err());
    }
}
