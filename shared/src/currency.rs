use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the client can display. Formatting always follows US
/// grouping (`1,234.50`) with the symbol in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Format an amount with two fraction digits, e.g. `-$1,234.50`
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            let text = if amount.is_nan() { "NaN" } else { "∞" };
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{}{}{}", sign, self.symbol(), text);
        }

        let fixed = fixed_two_places(amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        // -0.001 rounds to zero and is shown without a sign
        let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
        let sign = if negative { "-" } else { "" };

        format!("{}{}{}.{}", sign, self.symbol(), group_thousands(whole), fraction)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// Format an amount in US dollars: `format_currency(1234.5) == "$1,234.50"`
pub fn format_currency(amount: f64) -> String {
    Currency::Usd.format(amount)
}

/// Two fraction digits, halfway cases rounded away from zero (`1.125` -> `1.13`).
/// The exact binary value decides, so `2.675` (stored as 2.67499..) stays `2.67`.
fn fixed_two_places(amount: f64) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", amount),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_halfway_values_round_up() {
        let formatted: Vec<String> = [1.125, 0.125, 2.375, 10.625]
            .into_iter()
            .map(format_currency)
            .collect();
        assert_eq!(formatted, ["$1.13", "$0.13", "$2.38", "$10.63"]);
        assert_eq!(format_currency(-1.125), "-$1.13");
        assert_eq!(format_currency(2.675), "$2.67");
        assert_eq!(format_currency(9.0 / 8.0), "$1.13");
    }

    #[test]
    fn test_format_negative_amounts() {
        assert_eq!(format_currency(-42.1), "-$42.10");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-0.0), "$0.00");
    }

    #[test]
    fn test_other_currencies_keep_us_grouping() {
        assert_eq!(Currency::Eur.format(1234.5), "€1,234.50");
        assert_eq!(Currency::Gbp.format(75.0), "£75.00");
    }

    #[test]
    fn test_non_finite_amounts() {
        assert_eq!(format_currency(f64::NAN), "$NaN");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn test_parse_currency_code() {
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!(" USD ".parse::<Currency>(), Ok(Currency::Usd));
        assert!("PHP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
