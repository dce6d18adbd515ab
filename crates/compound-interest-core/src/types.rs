use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CompoundInterestError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.01 = 1%).
pub type Rate = Decimal;

/// Rates expressed as percentages (12 = 12%), as entered by a user.
pub type Percent = Decimal;

/// Currency used when formatting money for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    ILS,
    USD,
    EUR,
    GBP,
    CHF,
    JPY,
    CAD,
    AUD,
    Other(String),
}

impl Currency {
    /// Prefix written before a formatted amount.
    pub fn symbol(&self) -> String {
        match self {
            Currency::ILS => "₪".into(),
            Currency::USD => "$".into(),
            Currency::EUR => "€".into(),
            Currency::GBP => "£".into(),
            Currency::CHF => "CHF ".into(),
            Currency::JPY => "¥".into(),
            Currency::CAD => "C$".into(),
            Currency::AUD => "A$".into(),
            Currency::Other(code) => format!("{code} "),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ILS => "ILS",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CHF => "CHF",
            Self::JPY => "JPY",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::Other(code) => code.as_str(),
        };
        write!(f, "{s}")
    }
}

impl FromStr for Currency {
    type Err = CompoundInterestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let currency = match code.as_str() {
            "ILS" | "NIS" => Currency::ILS,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "GBP" => Currency::GBP,
            "CHF" => Currency::CHF,
            "JPY" => Currency::JPY,
            "CAD" => Currency::CAD,
            "AUD" => Currency::AUD,
            other if other.len() == 3 && other.chars().all(|c| c.is_ascii_alphabetic()) => {
                Currency::Other(other.to_string())
            }
            _ => {
                return Err(CompoundInterestError::InvalidInput {
                    field: "currency".into(),
                    reason: format!("'{s}' is not a three-letter currency code"),
                })
            }
        };
        Ok(currency)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a result with metadata. Timing is measured by the caller so the
/// computation itself never touches the clock.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse_known_and_other() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" nis ".parse::<Currency>().unwrap(), Currency::ILS);
        assert_eq!(
            "sek".parse::<Currency>().unwrap(),
            Currency::Other("SEK".into())
        );
    }

    #[test]
    fn test_currency_parse_rejects_garbage() {
        assert!("dollars".parse::<Currency>().is_err());
        assert!("U1D".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_display_round_trips_code() {
        assert_eq!(Currency::ILS.to_string(), "ILS");
        assert_eq!(Currency::Other("SEK".into()).to_string(), "SEK");
    }
}
