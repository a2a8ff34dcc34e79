//! Currency - Type-safe ISO 4217 currency codes
//!
//! Common procurement currencies are pre-defined; anything else that looks
//! like a valid 3-letter code falls back to `Other`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing currency codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Empty currency code")]
    EmptyCode,

    #[error("Currency code must be exactly 3 letters: {0}")]
    InvalidFormat(String),
}

/// Currency codes.
///
/// # Examples
/// ```
/// use procura_core::Currency;
///
/// let idr: Currency = "IDR".parse().unwrap();
/// assert_eq!(idr, Currency::Idr);
/// assert_eq!(idr.code(), "IDR");
///
/// // Unknown 3-letter codes are preserved
/// let myr: Currency = "myr".parse().unwrap();
/// assert!(matches!(myr, Currency::Other(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// Indonesian Rupiah
    Idr,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Singapore Dollar
    Sgd,
    /// Japanese Yen
    Jpy,
    /// Any other 3-letter code
    Other(String),
}

impl Currency {
    /// Returns the currency code as a string slice
    pub fn code(&self) -> &str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Sgd => "SGD",
            Currency::Jpy => "JPY",
            Currency::Other(code) => code.as_str(),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Idr
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();

        if code.is_empty() {
            return Err(CurrencyError::EmptyCode);
        }

        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidFormat(code));
        }

        Ok(match code.as_str() {
            "IDR" => Currency::Idr,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "SGD" => Currency::Sgd,
            "JPY" => Currency::Jpy,
            _ => Currency::Other(code),
        })
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_currencies() {
        assert_eq!("IDR".parse::<Currency>().unwrap(), Currency::Idr);
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" eur ".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn test_parse_other_code() {
        let parsed: Currency = "MYR".parse().unwrap();
        assert_eq!(parsed, Currency::Other("MYR".to_string()));
        assert_eq!(parsed.code(), "MYR");
    }

    #[test]
    fn test_empty_code_error() {
        let result: Result<Currency, _> = "  ".parse();
        assert!(matches!(result, Err(CurrencyError::EmptyCode)));
    }

    #[test]
    fn test_invalid_format_error() {
        assert!(matches!(
            "RUPIAH".parse::<Currency>(),
            Err(CurrencyError::InvalidFormat(_))
        ));
        assert!(matches!(
            "ID1".parse::<Currency>(),
            Err(CurrencyError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_default_is_idr() {
        assert_eq!(Currency::default(), Currency::Idr);
    }

    #[test]
    fn test_serde_roundtrip() {
        for currency in [Currency::Idr, Currency::Usd, Currency::Other("MYR".to_string())] {
            let json = serde_json::to_string(&currency).unwrap();
            let parsed: Currency = serde_json::from_str(&json).unwrap();
            assert_eq!(currency, parsed);
        }
    }
}
