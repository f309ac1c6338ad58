use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dates::CalendarMonth;

/// Persisted AI-call counter for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageState {
    pub count: u32,
    pub period: CalendarMonth,
}

impl UsageState {
    pub fn fresh(period: CalendarMonth) -> Self {
        Self { count: 0, period }
    }
}

/// Usage-cap class consulted by the usage meter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaTier {
    #[default]
    Free,
    Paid,
}

impl QuotaTier {
    pub const FREE_MONTHLY_CAP: u32 = 10;
    pub const PAID_MONTHLY_CAP: u32 = 200;

    pub fn monthly_cap(&self) -> u32 {
        match self {
            QuotaTier::Free => Self::FREE_MONTHLY_CAP,
            QuotaTier::Paid => Self::PAID_MONTHLY_CAP,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaTier::Free => "free",
            QuotaTier::Paid => "paid",
        }
    }
}

impl fmt::Display for QuotaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotaTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(QuotaTier::Free),
            "paid" | "pro" => Ok(QuotaTier::Paid),
            other => anyhow::bail!("unknown quota tier {:?} (expected free or paid)", other),
        }
    }
}
