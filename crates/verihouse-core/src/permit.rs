//! Permit and property records as returned by the upstream data providers.

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder rendered wherever a record has no usable date.
pub const NO_DATE: &str = "N/A";

/// A single building-permit entry from the SF open-data permits dataset.
///
/// Every upstream field is optional; absent or `null` fields deserialize to an
/// empty string. The datasets disagree on the date key, so both
/// `permit_creation_date` and `filed_date` are kept and resolved by
/// [`PermitRecord::effective_date`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermitRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub permit_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub street_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub street_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub street_suffix: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    /// ISO 8601 timestamp string, e.g. `2015-03-02T00:00:00.000`.
    #[serde(deserialize_with = "lenient_string")]
    pub permit_creation_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub filed_date: String,
}

impl PermitRecord {
    /// Minimal record with just a description and a creation date.
    pub fn new(description: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            permit_creation_date: date.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for the street number.
    pub fn with_street_number(mut self, number: impl Into<String>) -> Self {
        self.street_number = number.into();
        self
    }

    /// The creation date, falling back to the filing date.
    pub fn effective_date(&self) -> &str {
        let created = self.permit_creation_date.trim();
        if created.is_empty() {
            self.filed_date.trim()
        } else {
            created
        }
    }

    /// Year parsed from the first four characters of the effective date.
    ///
    /// Returns `None` for missing or non-numeric dates.
    pub fn year(&self) -> Option<i32> {
        self.effective_date().get(..4)?.parse().ok()
    }

    /// The year as display text, or `N/A`.
    pub fn year_label(&self) -> String {
        self.year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| NO_DATE.to_string())
    }

    /// The `YYYY-MM-DD` prefix of the effective date, or `N/A`.
    pub fn date_label(&self) -> &str {
        if self.year().is_none() {
            return NO_DATE;
        }
        let date = self.effective_date();
        date.get(..10).unwrap_or(date)
    }

    /// The description upper-cased for keyword matching.
    pub fn upper_description(&self) -> String {
        self.description.to_uppercase()
    }

    /// Whether the record's year falls within `window` years of `as_of`.
    ///
    /// Records without a parseable year are never recent.
    pub fn is_within(&self, window: i32, as_of: i32) -> bool {
        self.year().is_some_and(|y| as_of - y <= window)
    }
}

/// Property facts from the RentCast property-details API.
///
/// Only `year_built` feeds the maintenance predictor; the rest is shown on the
/// audit card when present. A malformed field becomes `None` without
/// affecting the others; numbers may arrive as JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDetails {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub formatted_address: Option<String>,
    #[serde(deserialize_with = "lenient_year")]
    pub year_built: Option<i32>,
    #[serde(deserialize_with = "lenient_count")]
    pub square_footage: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub last_sale_date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub bedrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub bathrooms: Option<f64>,
}

/// The current calendar year (UTC), used as the reference for recency windows.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Accept strings, numbers, booleans, and `null` for a string field.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A finite number from a JSON number or a numeric string.
fn number_in(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_in(&Value::deserialize(deserializer)?))
}

/// Whole years only; anything outside `1..=9999` is treated as missing.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_in(&Value::deserialize(deserializer)?)
        .map(f64::round)
        .filter(|y| (1.0..=9999.0).contains(y))
        .map(|y| y as i32))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_in(&Value::deserialize(deserializer)?)
        .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
        .map(|n| n.round() as u64))
}
