//! Monthly sales plan models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A numeric plan category.
///
/// Variants are declared in catalog order; [`PlanField::ALL`] preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanField {
    Gsm,
    Gadgets,
    Digital,
    Orders,
    Household,
    Tech,
    Photo,
    Sp,
    Service,
    Smart,
    Sim,
    Skill,
    Click,
    Vp,
    Nayavu,
    Spice,
    Auto,
}

/// Which part of the plan form a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanGroup {
    /// Core categories (GSM through SIM).
    Base,
    /// Add-on services (Skill through Auto).
    Additional,
}

impl PlanField {
    /// All fields in catalog order.
    pub const ALL: [PlanField; 17] = [
        PlanField::Gsm,
        PlanField::Gadgets,
        PlanField::Digital,
        PlanField::Orders,
        PlanField::Household,
        PlanField::Tech,
        PlanField::Photo,
        PlanField::Sp,
        PlanField::Service,
        PlanField::Smart,
        PlanField::Sim,
        PlanField::Skill,
        PlanField::Click,
        PlanField::Vp,
        PlanField::Nayavu,
        PlanField::Spice,
        PlanField::Auto,
    ];

    /// Identifier used in plan records.
    pub fn key(self) -> &'static str {
        match self {
            PlanField::Gsm => "gsm",
            PlanField::Gadgets => "gadgets",
            PlanField::Digital => "digital",
            PlanField::Orders => "orders",
            PlanField::Household => "household",
            PlanField::Tech => "tech",
            PlanField::Photo => "photo",
            PlanField::Sp => "sp",
            PlanField::Service => "service",
            PlanField::Smart => "smart",
            PlanField::Sim => "sim",
            PlanField::Skill => "skill",
            PlanField::Click => "click",
            PlanField::Vp => "vp",
            PlanField::Nayavu => "nayavu",
            PlanField::Spice => "spice",
            PlanField::Auto => "auto",
        }
    }

    /// Label as printed on paper plans.
    pub fn label(self) -> &'static str {
        match self {
            PlanField::Gsm => "GSM",
            PlanField::Gadgets => "Гаджеты",
            PlanField::Digital => "Digital",
            PlanField::Orders => "Заказы",
            PlanField::Household => "Бытовая техника",
            PlanField::Tech => "Техника",
            PlanField::Photo => "Фото",
            PlanField::Sp => "SP",
            PlanField::Service => "Сервис",
            PlanField::Smart => "Smart",
            PlanField::Sim => "SIM",
            PlanField::Skill => "Skill",
            PlanField::Click => "Click",
            PlanField::Vp => "VP",
            PlanField::Nayavu => "Наяву",
            PlanField::Spice => "Spice",
            PlanField::Auto => "Auto",
        }
    }

    pub fn group(self) -> PlanGroup {
        match self {
            PlanField::Skill
            | PlanField::Click
            | PlanField::Vp
            | PlanField::Nayavu
            | PlanField::Spice
            | PlanField::Auto => PlanGroup::Additional,
            _ => PlanGroup::Base,
        }
    }

    /// Look up a field by key, ignoring case and surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Targets for every plan field. Missing fields deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanValues {
    pub gsm: Decimal,
    pub gadgets: Decimal,
    pub digital: Decimal,
    pub orders: Decimal,
    pub household: Decimal,
    pub tech: Decimal,
    pub photo: Decimal,
    pub sp: Decimal,
    pub service: Decimal,
    pub smart: Decimal,
    pub sim: Decimal,
    pub skill: Decimal,
    pub click: Decimal,
    pub vp: Decimal,
    pub nayavu: Decimal,
    pub spice: Decimal,
    pub auto: Decimal,
}

impl PlanValues {
    pub fn get(&self, field: PlanField) -> Decimal {
        *self.slot(field)
    }

    pub fn set(&mut self, field: PlanField, value: Decimal) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: PlanField) -> &Decimal {
        match field {
            PlanField::Gsm => &self.gsm,
            PlanField::Gadgets => &self.gadgets,
            PlanField::Digital => &self.digital,
            PlanField::Orders => &self.orders,
            PlanField::Household => &self.household,
            PlanField::Tech => &self.tech,
            PlanField::Photo => &self.photo,
            PlanField::Sp => &self.sp,
            PlanField::Service => &self.service,
            PlanField::Smart => &self.smart,
            PlanField::Sim => &self.sim,
            PlanField::Skill => &self.skill,
            PlanField::Click => &self.click,
            PlanField::Vp => &self.vp,
            PlanField::Nayavu => &self.nayavu,
            PlanField::Spice => &self.spice,
            PlanField::Auto => &self.auto,
        }
    }

    fn slot_mut(&mut self, field: PlanField) -> &mut Decimal {
        match field {
            PlanField::Gsm => &mut self.gsm,
            PlanField::Gadgets => &mut self.gadgets,
            PlanField::Digital => &mut self.digital,
            PlanField::Orders => &mut self.orders,
            PlanField::Household => &mut self.household,
            PlanField::Tech => &mut self.tech,
            PlanField::Photo => &mut self.photo,
            PlanField::Sp => &mut self.sp,
            PlanField::Service => &mut self.service,
            PlanField::Smart => &mut self.smart,
            PlanField::Sim => &mut self.sim,
            PlanField::Skill => &mut self.skill,
            PlanField::Click => &mut self.click,
            PlanField::Vp => &mut self.vp,
            PlanField::Nayavu => &mut self.nayavu,
            PlanField::Spice => &mut self.spice,
            PlanField::Auto => &mut self.auto,
        }
    }

    /// Iterate over `(field, value)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (PlanField, Decimal)> + '_ {
        PlanField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Sum of all targets.
    pub fn total(&self) -> Decimal {
        self.iter().map(|(_, v)| v).sum()
    }

    pub fn base_total(&self) -> Decimal {
        self.group_total(PlanGroup::Base)
    }

    pub fn additional_total(&self) -> Decimal {
        self.group_total(PlanGroup::Additional)
    }

    fn group_total(&self, group: PlanGroup) -> Decimal {
        self.iter()
            .filter(|(f, _)| f.group() == group)
            .map(|(_, v)| v)
            .sum()
    }

    /// Overwrite the given fields, leaving the rest untouched.
    pub fn merge(&mut self, values: &BTreeMap<PlanField, Decimal>) {
        for (field, value) in values {
            self.set(*field, *value);
        }
    }
}

/// A store's plan for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlan {
    /// Plan identifier.
    pub id: String,

    /// Store the plan belongs to.
    pub store_id: String,

    /// Month in `YYYY-MM` form.
    pub month: String,

    /// Per-field targets.
    #[serde(flatten)]
    pub values: PlanValues,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl MonthlyPlan {
    /// Create an empty plan (all targets zero).
    pub fn new(
        id: impl Into<String>,
        store_id: impl Into<String>,
        month: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            store_id: store_id.into(),
            month: month.into(),
            values: PlanValues::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the plan and return the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store_id.trim().is_empty() {
            return Err(ValidationError::MissingField("storeId".to_string()));
        }

        parse_month(&self.month)?;

        for (field, value) in self.values.iter() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ValidationError::NegativePlanValue {
                    field: field.key().to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Apply confirmed values and bump `updated_at`.
    pub fn apply(&mut self, values: &BTreeMap<PlanField, Decimal>) {
        if values.is_empty() {
            return;
        }
        self.values.merge(values);
        self.updated_at = Utc::now();
    }
}

/// Parse a `YYYY-MM` month into the first day of that month.
pub fn parse_month(month: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = month.trim();
    let well_formed = trimmed.len() == 7 && trimmed.as_bytes()[4] == b'-';
    if !well_formed {
        return Err(ValidationError::InvalidMonth(month.to_string()));
    }

    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidMonth(month.to_string()))
}
