//! Revenue log and summary statistics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single revenue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    /// Amount earned.
    pub amount: Decimal,

    /// Day the revenue was booked.
    pub date: NaiveDate,
}

impl Revenue {
    pub fn new(amount: Decimal, date: NaiveDate) -> Self {
        Self { amount, date }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount.to_string()));
        }
        Ok(())
    }
}

/// Aggregate figures over a revenue log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
    pub max: Decimal,
    pub min: Decimal,
}

impl SummaryStats {
    /// Compute statistics. An empty log yields all zeros.
    pub fn from_revenues(revenues: &[Revenue]) -> Result<Self, ValidationError> {
        if revenues.is_empty() {
            return Ok(Self::default());
        }

        let total = revenues
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |acc, (i, r)| {
                acc.checked_add(r.amount)
                    .ok_or(ValidationError::TotalOverflow(i + 1))
            })?;
        let count = revenues.len();
        let max = revenues.iter().map(|r| r.amount).max().unwrap_or_default();
        let min = revenues.iter().map(|r| r.amount).min().unwrap_or_default();

        Ok(Self {
            count,
            total,
            average: total / Decimal::from(count),
            max,
            min,
        })
    }

    /// Labelled, formatted rows for display.
    pub fn rows(&self, currency: &str) -> Vec<(&'static str, String)> {
        vec![
            ("Общий доход", format_with_currency(self.total, currency)),
            ("Средний доход", format_with_currency(self.average, currency)),
            ("Максимальный доход", format_with_currency(self.max, currency)),
            ("Минимальный доход", format_with_currency(self.min, currency)),
        ]
    }
}

/// Parse an amount written with spaces as thousand separators and either
/// comma or period as decimal separator (e.g., "1 234,56").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let negative = s.trim_start().starts_with('-');
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Whichever separator comes last is the decimal one
        match (cleaned.rfind(','), cleaned.rfind('.')) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            _ => cleaned.replace(',', ""),
        }
    } else {
        cleaned
    };

    let value: Decimal = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Format an amount Russian style: "1 234,56".
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

pub fn format_with_currency(amount: Decimal, currency: &str) -> String {
    if currency.is_empty() {
        format_amount(amount)
    } else {
        format!("{} {}", format_amount(amount), currency)
    }
}
