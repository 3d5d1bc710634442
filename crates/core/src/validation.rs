//! Validation of the discount form.
//!
//! [`validate`] never fails. It returns a sparse [`ValidationErrors`]: a field
//! appears only when at least one of its flags is raised, and flags that are
//! not raised are left out of the serialized form entirely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::conversion::to_cent_amount;
use crate::form::{DiscountType, FormState, is_blank, parse_decimal, plain_fraction};

const MAX_RELATIVE_PERCENT: Decimal = Decimal::ONE_HUNDRED;
const MAX_RELATIVE_FRACTION_DIGITS: u32 = 2;

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Violations on the relative (percentage) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelativeValueErrors {
    #[serde(skip_serializing_if = "is_false")]
    pub missing: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub invalid_number: bool,
    /// Below 0 or above 100.
    #[serde(skip_serializing_if = "is_false")]
    pub cart_discount_out_of_boundaries: bool,
    /// More than two fraction digits.
    #[serde(skip_serializing_if = "is_false")]
    pub cart_discount_too_precise: bool,
}

impl RelativeValueErrors {
    /// Whether no flag is raised.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.missing
            || self.invalid_number
            || self.cart_discount_out_of_boundaries
            || self.cart_discount_too_precise)
    }
}

/// Violations on the absolute (money) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbsoluteValueErrors {
    /// Amount or currency left blank.
    #[serde(skip_serializing_if = "is_false")]
    pub missing: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub invalid_number: bool,
    /// Negative, or too large to express in cents.
    #[serde(skip_serializing_if = "is_false")]
    pub cart_discount_out_of_boundaries: bool,
}

impl AbsoluteValueErrors {
    /// Whether no flag is raised.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.missing || self.invalid_number || self.cart_discount_out_of_boundaries)
    }
}

/// Per-field validation result. Empty means the form may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value_relative: Option<RelativeValueErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value_absolute: Option<AbsoluteValueErrors>,
}

impl ValidationErrors {
    /// Whether the form passed validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.discount_value_relative.is_none() && self.discount_value_absolute.is_none()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut flags = Vec::new();
        if let Some(relative) = &self.discount_value_relative {
            let named = [
                (relative.missing, "missing"),
                (relative.invalid_number, "invalidNumber"),
                (relative.cart_discount_out_of_boundaries, "cartDiscountOutOfBoundaries"),
                (relative.cart_discount_too_precise, "cartDiscountTooPrecise"),
            ];
            flags.extend(
                named
                    .into_iter()
                    .filter(|(raised, _)| *raised)
                    .map(|(_, name)| format!("discountValueRelative.{name}")),
            );
        }
        if let Some(absolute) = &self.discount_value_absolute {
            let named = [
                (absolute.missing, "missing"),
                (absolute.invalid_number, "invalidNumber"),
                (absolute.cart_discount_out_of_boundaries, "cartDiscountOutOfBoundaries"),
            ];
            flags.extend(
                named
                    .into_iter()
                    .filter(|(raised, _)| *raised)
                    .map(|(_, name)| format!("discountValueAbsolute.{name}")),
            );
        }
        write!(f, "{}", flags.join(", "))
    }
}

/// Validate the active branch of the form.
#[must_use]
pub fn validate(form: &FormState) -> ValidationErrors {
    match form.discount_type {
        DiscountType::Relative => ValidationErrors {
            discount_value_relative: Some(validate_relative(&form.discount_value_relative))
                .filter(|e| !e.is_empty()),
            discount_value_absolute: None,
        },
        DiscountType::Absolute => {
            let input = &form.discount_value_absolute;
            ValidationErrors {
                discount_value_relative: None,
                discount_value_absolute: Some(validate_absolute(
                    &input.amount,
                    &input.currency_code,
                ))
                .filter(|e| !e.is_empty()),
            }
        }
    }
}

fn validate_relative(input: &str) -> RelativeValueErrors {
    let mut errors = RelativeValueErrors::default();
    if is_blank(input) {
        errors.missing = true;
        return errors;
    }

    let Some(value) = parse_decimal(input) else {
        // A plain number that does not fit a Decimal is far past 100.
        match plain_fraction(input) {
            Some(fraction) => {
                errors.cart_discount_out_of_boundaries = true;
                errors.cart_discount_too_precise =
                    fraction.trim_end_matches('0').len() > MAX_RELATIVE_FRACTION_DIGITS as usize;
            }
            None => errors.invalid_number = true,
        }
        return errors;
    };

    errors.cart_discount_out_of_boundaries =
        (value.is_sign_negative() && !value.is_zero()) || value > MAX_RELATIVE_PERCENT;
    errors.cart_discount_too_precise = value.round_dp(MAX_RELATIVE_FRACTION_DIGITS) != value;
    errors
}

fn validate_absolute(amount: &str, currency_code: &str) -> AbsoluteValueErrors {
    let mut errors = AbsoluteValueErrors::default();
    if is_blank(amount) || is_blank(currency_code) {
        errors.missing = true;
        return errors;
    }

    match parse_decimal(amount) {
        Some(value) => errors.cart_discount_out_of_boundaries = to_cent_amount(value).is_none(),
        None if plain_fraction(amount).is_some() => errors.cart_discount_out_of_boundaries = true,
        None => errors.invalid_number = true,
    }
    errors
}
