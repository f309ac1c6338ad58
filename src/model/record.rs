use serde::{Deserialize, Serialize};
use time::Date;

use super::dates::iso_date;

/// One tracked billable service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub monthly_fee: u64,

    #[serde(with = "iso_date")]
    pub added_at: Date,
}

/// A monthly fee as supplied by a user or the assistant, before coercion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeInput {
    Amount(f64),
    Text(String),
}

impl FeeInput {
    /// Coerce to a non-negative whole amount; anything non-numeric is 0.
    ///
    /// Text is read like a leading-integer parse: `"1200"` and `"1200 yen"`
    /// both give 1200, `"abc"` and `""` give 0.
    pub fn coerce(&self) -> u64 {
        match self {
            FeeInput::Amount(v) => {
                if v.is_finite() && *v >= 0.0 {
                    v.trunc() as u64
                } else {
                    0
                }
            }
            FeeInput::Text(s) => coerce_fee_text(s),
        }
    }
}

impl From<&str> for FeeInput {
    fn from(s: &str) -> Self {
        FeeInput::Text(s.to_string())
    }
}

impl From<u64> for FeeInput {
    fn from(v: u64) -> Self {
        FeeInput::Amount(v as f64)
    }
}

fn coerce_fee_text(s: &str) -> u64 {
    let s = s.trim();
    if s.starts_with('-') {
        return 0;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Fields for a record about to be created, from manual entry or an
/// accepted suggestion. Validated and coerced by the mutation pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordInput {
    pub name: String,
    pub url: Option<String>,
    pub category: Option<String>,
    pub monthly_fee: Option<FeeInput>,
}

impl RecordInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_fee(mut self, fee: impl Into<FeeInput>) -> Self {
        self.monthly_fee = Some(fee.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn coerced_fee(&self) -> u64 {
        self.monthly_fee.as_ref().map(FeeInput::coerce).unwrap_or(0)
    }
}

/// Untrusted record proposal extracted from assistant output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<FeeInput>,
}

impl From<SuggestionPayload> for RecordInput {
    fn from(p: SuggestionPayload) -> Self {
        Self {
            name: p.name,
            url: p.url,
            category: p.category,
            monthly_fee: p.monthly_fee,
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/record_tests.rs"]
mod tests;
