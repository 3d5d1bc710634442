//! Money as the commerce platform represents it: integer minor units plus a
//! currency code.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DEFAULT_FRACTION_DIGITS: u32 = 2;

const fn default_fraction_digits() -> u32 {
    DEFAULT_FRACTION_DIGITS
}

/// ISO 4217 currency code, passed through verbatim.
///
/// The platform accepts whatever currencies the project is configured for, so
/// this is a thin wrapper rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code from its string form.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the currency code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A monetary amount in minor units.
///
/// Deserializes from both cent-precision and high-precision platform money;
/// the `type` discriminator on the wire is not needed and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's minor unit (e.g., cents).
    pub cent_amount: i64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
    /// Number of minor-unit digits (2 for EUR/USD, 0 for JPY).
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,
    /// Exact amount for high-precision money, scaled by `fraction_digits`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precise_amount: Option<i64>,
}

impl Money {
    /// Create cent-precision money with the default two fraction digits.
    #[must_use]
    pub fn from_cents(cent_amount: i64, currency_code: CurrencyCode) -> Self {
        Self {
            cent_amount,
            currency_code,
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            precise_amount: None,
        }
    }

    /// The amount in the currency's standard unit (e.g., euros, not cents).
    ///
    /// High-precision money uses `precise_amount`. Returns `None` when the
    /// fraction digits exceed what a decimal can represent.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        let minor = self.precise_amount.unwrap_or(self.cent_amount);
        Decimal::try_new(minor, self.fraction_digits).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{amount} {}", self.currency_code),
            None => write!(f, "{} {}", self.cent_amount, self.currency_code),
        }
    }
}
