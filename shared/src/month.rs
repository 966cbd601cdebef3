use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The month the dashboard is currently showing.
///
/// Holds a full calendar date; only its month and year matter for display,
/// while the whole date is sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentMonth {
    date: NaiveDate,
}

impl CurrentMonth {
    pub fn today(today: NaiveDate) -> Self {
        Self { date: today }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// One month back. The day is clamped to the target month's length, so
    /// March 31st becomes February 28th/29th rather than spilling into March.
    pub fn previous(&self) -> Self {
        Self {
            date: self.date.checked_sub_months(Months::new(1)).unwrap_or(self.date),
        }
    }

    /// One month forward, clamped like [`CurrentMonth::previous`]
    pub fn next(&self) -> Self {
        Self {
            date: self.date.checked_add_months(Months::new(1)).unwrap_or(self.date),
        }
    }

    /// "March 2024"
    pub fn label(&self) -> String {
        self.date.format("%B %Y").to_string()
    }

    /// Value of the `date` query parameter: local midnight, ISO-8601
    pub fn query_timestamp(&self) -> String {
        self.date.format("%Y-%m-%dT00:00:00").to_string()
    }
}

/// How expense dates are rendered in the recent expenses table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateFormat {
    /// `3/1/2024`
    #[default]
    Us,
    /// `01/03/2024`
    Eu,
    /// `2024-03-01`
    Iso,
}

impl DateFormat {
    /// Render a date string coming from the backend. Strings that are not a
    /// recognizable date are returned unchanged.
    pub fn format(&self, raw: &str) -> String {
        match parse_expense_date(raw) {
            Some(date) => {
                let pattern = match self {
                    DateFormat::Us => "%-m/%-d/%Y",
                    DateFormat::Eu => "%d/%m/%Y",
                    DateFormat::Iso => "%Y-%m-%d",
                };
                date.format(pattern).to_string()
            }
            None => raw.to_string(),
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(DateFormat::Us),
            "EU" => Ok(DateFormat::Eu),
            "ISO" => Ok(DateFormat::Iso),
            other => Err(format!("unsupported date format: {}", other)),
        }
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `YYYY-MM-DD HH:MM:SS`
pub fn parse_expense_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    None
}
