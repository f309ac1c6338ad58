use std::fmt;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::{Date, Month};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");
const MONTH_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month repr:numerical padding:zero]");

/// A calendar year-month, the counting window for AI usage.
///
/// Serialized as `YYYY-MM`. Ordering follows the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u8,
}

impl CalendarMonth {
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month: u8::from(month),
        }
    }

    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        // `month` is always constructed from a valid `Month`.
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// The month immediately after this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First calendar day of this month.
    pub fn first_day(&self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month(), 1).ok()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for CalendarMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ensure_unsigned(s)?;
        let mut parsed = Parsed::new();
        let rest = parsed
            .parse_items(s.as_bytes(), MONTH_FORMAT)
            .with_context(|| format!("invalid year-month {:?} (expected YYYY-MM)", s))?;
        if !rest.is_empty() {
            anyhow::bail!("trailing input in year-month {:?}", s);
        }
        match (parsed.year(), parsed.month()) {
            (Some(year), Some(month)) => Ok(Self::new(year, month)),
            _ => Err(anyhow!("invalid year-month {:?}", s)),
        }
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

pub fn parse_date(s: &str) -> anyhow::Result<Date> {
    ensure_unsigned(s)?;
    Date::parse(s, DATE_FORMAT)
        .with_context(|| format!("invalid date {:?} (expected YYYY-MM-DD)", s))
}

/// `[year]` would take a leading sign; stored values never carry one.
fn ensure_unsigned(s: &str) -> anyhow::Result<()> {
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        anyhow::bail!("invalid date {:?}", s);
    }
    Ok(())
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../tests/model/dates_tests.rs"]
mod tests;
