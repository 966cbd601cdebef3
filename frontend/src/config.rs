use shared::{Currency, DateFormat};
use std::str::FromStr;
use web_sys::Document;

use crate::services::Logger;

/// Page-level settings, read from `data-*` attributes on `<body>`:
///
/// ```html
/// <body data-api-base="" data-currency="USD" data-date-format="US"
///       data-log-endpoint="/api/logs">
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientConfig {
    /// Prefix for API paths; empty means same origin
    pub api_base: String,
    pub currency: Currency,
    pub date_format: DateFormat,
    /// Backend endpoint that receives a copy of client log records
    pub log_endpoint: Option<String>,
}

impl ClientConfig {
    pub fn from_document(document: &Document) -> Self {
        let Some(body) = document.body() else {
            return Self::default();
        };
        let attr = |name: &str| {
            body.get_attribute(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base: attr("data-api-base").unwrap_or_default(),
            currency: parse_or_default(attr("data-currency"), "data-currency"),
            date_format: parse_or_default(attr("data-date-format"), "data-date-format"),
            log_endpoint: attr("data-log-endpoint"),
        }
    }

    /// Path of the expenses listing page
    pub fn expenses_page(&self) -> String {
        format!("{}/expenses", self.api_base.trim_end_matches('/'))
    }
}

fn parse_or_default<T>(value: Option<String>, attribute: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        Some(Err(e)) => {
            Logger::warn_with_component("config", &format!("Ignoring {}: {}", attribute, e));
            T::default()
        }
        None => T::default(),
    }
}
