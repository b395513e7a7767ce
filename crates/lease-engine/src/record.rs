//! Contract record supplied by the caller for one generation run

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A single field value
///
/// Deserialized untagged, so `100000000`, `84.9`, `"2024-03-01"` and
/// `"김철수"` become `Number`, `Decimal`, `Date` and `Text` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Decimal(f64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Flat mapping from field name to value
///
/// No field is required. An absent or blank field leaves the template's
/// default in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ContractRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a field, treating blank text as absent
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|value| !value.is_blank())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String form of a field
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(|value| match value {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Decimal(d) => d.to_string(),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FieldValue::Text(text) => text.trim().to_string(),
        })
    }

    /// Value of an enum-tag field such as `contract_type`
    pub fn tag(&self, field: &str) -> Option<&str> {
        match self.get(field)? {
            FieldValue::Text(text) => Some(text.trim()),
            _ => None,
        }
    }

    /// Monetary amount of a field
    ///
    /// Text values are accepted with separators and a trailing `원` or
    /// `원정`, e.g. `"50,000,000원"`. Decimals must be whole numbers.
    pub fn amount(&self, field: &str) -> Result<Option<i64>, RenderError> {
        match self.get(field) {
            None => Ok(None),
            Some(FieldValue::Number(n)) => Ok(Some(*n)),
            Some(FieldValue::Decimal(d)) => {
                if d.fract() == 0.0 && d.abs() < i64::MAX as f64 {
                    Ok(Some(*d as i64))
                } else {
                    Err(invalid(field, &d.to_string()))
                }
            }
            Some(FieldValue::Text(text)) => {
                let cleaned: String = text
                    .trim()
                    .trim_end_matches("원정")
                    .trim_end_matches('원')
                    .chars()
                    .filter(|c| *c != ',' && !c.is_whitespace())
                    .collect();
                cleaned
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| invalid(field, text))
            }
            Some(FieldValue::Date(date)) => Err(invalid(field, &date.to_string())),
        }
    }

    /// Calendar date of a field (`YYYY-MM-DD` when given as text)
    pub fn date(&self, field: &str) -> Result<Option<NaiveDate>, RenderError> {
        match self.get(field) {
            None => Ok(None),
            Some(FieldValue::Date(date)) => Ok(Some(*date)),
            Some(FieldValue::Text(text)) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|_| invalid(field, text)),
            Some(FieldValue::Number(n)) => Err(invalid(field, &n.to_string())),
            Some(FieldValue::Decimal(d)) => Err(invalid(field, &d.to_string())),
        }
    }
}

fn invalid(field: &str, value: &str) -> RenderError {
    RenderError::InvalidFieldValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
