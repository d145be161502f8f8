//! Configuration structures for plan review and reporting.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesPlanError};
use crate::matching::FieldCatalog;
use crate::models::plan::PlanField;

/// Main configuration for salesplan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesPlanConfig {
    /// Review/confirmation configuration.
    pub review: ReviewConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Field catalog configuration.
    pub catalog: CatalogConfig,
}

/// Which numeric value is kept when several follow a single label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// Keep the first value after the label.
    #[default]
    First,
    /// Keep the last value before the next label.
    Last,
}

/// Review step configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Tokens with OCR confidence below this (0 - 100) are flagged.
    pub low_confidence: f32,

    /// Value pairing policy.
    pub pairing: PairingPolicy,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            low_confidence: 60.0,
            pairing: PairingPolicy::First,
        }
    }
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    #[default]
    Json,
    Csv,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when none is given on the command line.
    pub default_format: OutputKind,

    /// Currency symbol appended to formatted amounts.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputKind::Json,
            currency_symbol: "₽".to_string(),
        }
    }
}

/// Field catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Plan field keys to match against (empty = all fields).
    pub fields: Vec<String>,
}

impl CatalogConfig {
    /// Build the catalog this configuration selects.
    pub fn catalog(&self) -> Result<FieldCatalog> {
        if self.fields.is_empty() {
            return Ok(FieldCatalog::plan_fields());
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for key in &self.fields {
            let field = PlanField::from_key(key).ok_or_else(|| {
                SalesPlanError::Config(format!("unknown plan field in catalog: {}", key))
            })?;
            fields.push(field);
        }
        Ok(FieldCatalog::from_plan_fields(fields))
    }
}

impl SalesPlanConfig {
    /// Check values that serde alone cannot: the confidence range and the
    /// catalog keys.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.review.low_confidence;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(SalesPlanError::Config(format!(
                "review.low_confidence must be between 0 and 100, got {}",
                threshold
            )));
        }
        self.catalog.catalog()?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SalesPlanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SalesPlanConfig =
            serde_json::from_str(r#"{"review": {"pairing": "last"}}"#).unwrap();
        assert_eq!(config.review.pairing, PairingPolicy::Last);
        assert_eq!(config.review.low_confidence, 60.0);
        assert_eq!(config.output.currency_symbol, "₽");
    }

    #[test]
    fn test_catalog_subset() {
        let config = CatalogConfig {
            fields: vec!["GSM".to_string(), "sim".to_string()],
        };
        let catalog = config.catalog().unwrap();
        let keys: Vec<_> = catalog.keys().collect();
        assert_eq!(keys, vec!["gsm", "sim"]);

        let bad = CatalogConfig {
            fields: vec!["bogus".to_string()],
        };
        assert!(matches!(bad.catalog(), Err(SalesPlanError::Config(_))));
    }

    #[test]
    fn test_validate() {
        assert!(SalesPlanConfig::default().validate().is_ok());

        let mut config = SalesPlanConfig::default();
        config.review.low_confidence = 120.0;
        assert!(matches!(config.validate(), Err(SalesPlanError::Config(_))));

        let mut config = SalesPlanConfig::default();
        config.catalog.fields = vec!["gsm".to_string(), "bonus".to_string()];
        assert!(matches!(config.validate(), Err(SalesPlanError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SalesPlanConfig::default();
        config.output.default_format = OutputKind::Text;
        config.save(&path).unwrap();

        let loaded = SalesPlanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.default_format, OutputKind::Text);
    }
}
