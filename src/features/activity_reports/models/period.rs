use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::shared::validation::PERIOD_REGEX;

/// A calendar month, written `YYYY-MM`.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period '{0}', expected YYYY-MM")]
    Format(String),

    #[error("Year {0} is out of range (1-9999)")]
    Year(i32),

    #[error("Month {0} is out of range (1-12)")]
    Month(u32),
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        let year = Self::check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(PeriodError::Month(month));
        }
        Ok(Self { year, month })
    }

    /// Years accepted by the `YYYY` half of a period
    pub fn check_year(year: i32) -> Result<i32, PeriodError> {
        if (1..=9999).contains(&year) {
            Ok(year)
        } else {
            Err(PeriodError::Year(year))
        }
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period containing today's local date
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    #[cfg(test)]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Prefix shared by every period of `year`, for `LIKE` range scans
    pub fn year_prefix(year: i32) -> String {
        format!("{:04}-", year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = PERIOD_REGEX
            .captures(trimmed)
            .ok_or_else(|| PeriodError::Format(s.to_string()))?;

        let year = caps[1]
            .parse::<i32>()
            .map_err(|_| PeriodError::Format(s.to_string()))?;
        let month = caps[2]
            .parse::<u32>()
            .map_err(|_| PeriodError::Format(s.to_string()))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let period: Period = "2026-01".parse().unwrap();
        assert_eq!(period.year(), 2026);
        assert_eq!(period.month(), 1);
        assert_eq!(period.to_string(), "2026-01");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let period: Period = " 2026-03 ".parse().unwrap();
        assert_eq!(period.to_string(), "2026-03");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["2026-1", "2026-13", "2026-00", "26-01", "2026/01", "", "0000-01"] {
            assert!(raw.parse::<Period>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut periods: Vec<Period> = ["2026-03", "2025-12", "2026-01"]
            .iter()
            .map(|p| p.parse().unwrap())
            .collect();
        periods.sort();

        let sorted: Vec<String> = periods.iter().map(Period::to_string).collect();
        assert_eq!(sorted, vec!["2025-12", "2026-01", "2026-03"]);
    }

    #[test]
    fn test_containing_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        assert_eq!(Period::containing(date).to_string(), "2026-07");
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(Period::check_year(2026), Ok(2026));
        assert_eq!(Period::check_year(0), Err(PeriodError::Year(0)));
        assert_eq!(Period::check_year(10000), Err(PeriodError::Year(10000)));
        assert_eq!(Period::year_prefix(2026), "2026-");
    }

    #[test]
    fn test_serde_as_string() {
        let period = Period::new(2026, 2).unwrap();
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"2026-02\"");

        let back: Period = serde_json::from_str("\"2026-02\"").unwrap();
        assert_eq!(back, period);
        assert!(serde_json::from_str::<Period>("\"2026-2\"").is_err());
    }
}
