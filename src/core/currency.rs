use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// The engine treats the code as opaque: balances and transfers are raw
/// decimal amounts tagged with whatever code the group uses.
///
/// # Examples
///
/// ```
/// use split_engine::core::currency::CurrencyCode;
///
/// let eur = CurrencyCode::new("EUR");
/// let usd = CurrencyCode::new("USD");
/// assert_ne!(eur, usd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from currency table operations.
#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("currency rate must be positive, got {rate} for {code}")]
    InvalidRate { code: CurrencyCode, rate: Decimal },
}

/// Static conversion table for display-level currency conversion.
///
/// Rates are expressed relative to a base currency. Unknown codes fall
/// back to a rate of 1, so conversion degrades to the identity rather
/// than failing. The engine itself never converts; this table exists for
/// callers that display a group's amounts in another currency.
///
/// # Examples
///
/// ```
/// use split_engine::core::currency::{CurrencyCode, CurrencyTable};
/// use rust_decimal_macros::dec;
///
/// let table = CurrencyTable::builtin();
/// let converted = table.convert(
///     dec!(100),
///     &CurrencyCode::new("EUR"),
///     &CurrencyCode::new("EUR"),
/// );
/// assert_eq!(converted, dec!(100));
/// ```
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    /// The base currency the rates are quoted against.
    pub base_currency: CurrencyCode,
    /// code -> units of `code` per one unit of base.
    rates: HashMap<CurrencyCode, Decimal>,
}

impl CurrencyTable {
    /// Create an empty table with the given base currency.
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            rates: HashMap::new(),
        }
    }

    /// The built-in static table: EUR base with a handful of fixed rates.
    pub fn builtin() -> Self {
        let mut table = Self::new(CurrencyCode::new("EUR"));
        // Static MVP rates; accuracy is explicitly not a goal.
        for (code, rate) in [
            ("EUR", dec!(1)),
            ("USD", dec!(1.09)),
            ("GBP", dec!(0.86)),
            ("CHF", dec!(0.96)),
        ] {
            let _ = table.set_rate(CurrencyCode::new(code), rate);
        }
        table
    }

    /// Set the rate for a currency: 1 unit of base = `rate` units of `code`.
    pub fn set_rate(&mut self, code: CurrencyCode, rate: Decimal) -> Result<(), CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate { code, rate });
        }
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Get the rate for a currency, defaulting to 1 for unknown codes.
    pub fn rate(&self, code: &CurrencyCode) -> Decimal {
        self.rates.get(code).copied().unwrap_or(Decimal::ONE)
    }

    /// Convert an amount from one currency to another through the base.
    pub fn convert(&self, amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
        if from == to {
            return amount;
        }
        amount / self.rate(from) * self.rate(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("EUR");
        let b = CurrencyCode::new("EUR");
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_table_identity() {
        let table = CurrencyTable::builtin();
        let eur = CurrencyCode::new("EUR");
        assert_eq!(table.convert(dec!(42.50), &eur, &eur), dec!(42.50));
    }

    #[test]
    fn test_convert_through_base() {
        let table = CurrencyTable::builtin();
        let result = table.convert(
            dec!(100),
            &CurrencyCode::new("EUR"),
            &CurrencyCode::new("USD"),
        );
        assert_eq!(result, dec!(109));
    }

    #[test]
    fn test_unknown_code_falls_back_to_one() {
        let table = CurrencyTable::builtin();
        let result = table.convert(
            dec!(100),
            &CurrencyCode::new("XXX"),
            &CurrencyCode::new("YYY"),
        );
        assert_eq!(result, dec!(100));
    }

    #[test]
    fn test_invalid_rate() {
        let mut table = CurrencyTable::new(CurrencyCode::new("EUR"));
        let result = table.set_rate(CurrencyCode::new("USD"), dec!(-1.09));
        assert!(result.is_err());
    }
}
