//! Form state for the "apply direct discount" form.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartSnapshot, CurrencyCode, DiscountTarget};

/// Which value input the operator is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountType {
    #[default]
    Relative,
    Absolute,
}

/// Which part of the cart the operator wants to discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetType {
    #[default]
    TotalPrice,
    Shipping,
}

impl From<TargetType> for DiscountTarget {
    fn from(target: TargetType) -> Self {
        match target {
            TargetType::TotalPrice => Self::TotalPrice,
            TargetType::Shipping => Self::Shipping,
        }
    }
}

/// Raw money input; both fields are free text until validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbsoluteInput {
    pub amount: String,
    pub currency_code: String,
}

/// Everything the operator has typed into the form.
///
/// Only the branch selected by `discount_type` is validated and converted;
/// the other branch keeps whatever it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub discount_type: DiscountType,
    pub target_type: TargetType,
    /// Percentage, e.g. `"12.5"` for 12.5%.
    pub discount_value_relative: String,
    pub discount_value_absolute: AbsoluteInput,
}

impl FormState {
    /// A blank relative-discount form whose money input uses `currency`.
    #[must_use]
    pub fn initial(currency: &CurrencyCode) -> Self {
        Self {
            discount_value_absolute: AbsoluteInput {
                amount: String::new(),
                currency_code: currency.as_str().to_owned(),
            },
            ..Self::default()
        }
    }

    /// The initial form for a cart, seeded with its total price currency.
    #[must_use]
    pub fn for_cart(cart: &CartSnapshot) -> Self {
        Self::initial(&cart.total_price.currency_code)
    }
}

/// Parse form text as a decimal number, ignoring surrounding whitespace.
///
/// Only plain notation is accepted, see [`plain_fraction`].
pub(crate) fn parse_decimal(input: &str) -> Option<Decimal> {
    plain_fraction(input)?;
    Decimal::from_str(input.trim()).ok()
}

/// The fraction digits of form text written as a plain decimal number: an
/// optional sign, integer digits and an optional `.` followed by digits.
///
/// Returns `None` for anything else, including digit separators and
/// exponents. The number itself may still be too large for [`Decimal`].
pub(crate) fn plain_fraction(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((_, "")) => return None,
        Some(parts) => parts,
        None => (unsigned, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    (!whole.is_empty() && is_digits(whole) && is_digits(fraction)).then_some(fraction)
}

/// Whether form text is absent for validation purposes.
pub(crate) fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
