//! Conversion into drafts.
//!
//! Two independent mappings feed the replacement list:
//! - [`to_draft_list`] re-describes discounts already on the cart,
//! - [`from_form_to_draft`] describes the discount the operator just entered.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::capabilities::DiscountCapabilities;
use crate::form::{DiscountType, FormState, parse_decimal};
use crate::types::{
    CurrencyCode, DirectDiscount, DirectDiscountDraft, DiscountTarget, DiscountValue, Money,
};

/// Form units to wire units: percent to permyriad, and major to minor currency units.
const WIRE_SCALE: Decimal = Decimal::ONE_HUNDRED;

/// Errors converting form input into a draft.
///
/// A form that passes [`crate::validate`] converts without error. Forms that
/// skip validation can hit either variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The field does not hold a decimal number.
    #[error("{field} is not a number: {input:?}")]
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// The rejected text.
        input: String,
    },
    /// The scaled value does not fit the wire integer.
    #[error("{field} is out of range: {value}")]
    OutOfRange {
        /// Form field name.
        field: &'static str,
        /// The parsed, unscaled value.
        value: Decimal,
    },
}

/// Re-describe existing discounts as drafts, preserving order.
///
/// Leaving an entry out of the input is how a discount gets removed, since
/// the platform replaces the whole list.
#[must_use]
pub fn to_draft_list(existing: &[DirectDiscount]) -> Vec<DirectDiscountDraft> {
    existing.iter().map(to_draft).collect()
}

fn to_draft(discount: &DirectDiscount) -> DirectDiscountDraft {
    let value = match &discount.value {
        DiscountValue::Relative { permyriad } => DiscountValue::Relative {
            permyriad: *permyriad,
        },
        DiscountValue::Absolute { money } => DiscountValue::Absolute {
            money: money
                .iter()
                .map(|m| Money {
                    cent_amount: m.cent_amount,
                    currency_code: m.currency_code.clone(),
                    fraction_digits: m.fraction_digits,
                    precise_amount: None,
                })
                .collect(),
        },
    };

    DirectDiscountDraft {
        target: discount.target,
        value,
    }
}

/// Build a draft from the active branch of the form.
///
/// Amounts are scaled by 100 and rounded half away from zero: `"12.5"`
/// percent becomes 1250 permyriad, `"10.5"` EUR becomes 1050 cents. The
/// target comes from the form only when shipping targets are supported.
///
/// # Errors
///
/// Returns [`ConversionError`] when the active value is not a number, is
/// negative, or does not fit the wire integer after scaling.
pub fn from_form_to_draft(
    form: &FormState,
    capabilities: DiscountCapabilities,
) -> Result<DirectDiscountDraft, ConversionError> {
    let value = match form.discount_type {
        DiscountType::Absolute => {
            let input = &form.discount_value_absolute;
            let amount = parse_field("discountValueAbsolute.amount", &input.amount)?;
            let cent_amount = to_cent_amount(amount).ok_or(ConversionError::OutOfRange {
                field: "discountValueAbsolute.amount",
                value: amount,
            })?;
            DiscountValue::Absolute {
                money: vec![Money::from_cents(
                    cent_amount,
                    CurrencyCode::new(input.currency_code.as_str()),
                )],
            }
        }
        DiscountType::Relative => {
            let percent = parse_field("discountValueRelative", &form.discount_value_relative)?;
            let permyriad = Some(percent)
                .filter(|percent| *percent >= Decimal::ZERO)
                .and_then(scale)
                .and_then(|scaled| scaled.to_u32())
                .ok_or(ConversionError::OutOfRange {
                    field: "discountValueRelative",
                    value: percent,
                })?;
            DiscountValue::Relative { permyriad }
        }
    };

    let target = if capabilities.supports_shipping_target {
        form.target_type.into()
    } else {
        DiscountTarget::TotalPrice
    };

    Ok(DirectDiscountDraft {
        target: Some(target),
        value,
    })
}

fn parse_field(field: &'static str, input: &str) -> Result<Decimal, ConversionError> {
    parse_decimal(input).ok_or_else(|| ConversionError::InvalidNumber {
        field,
        input: input.to_owned(),
    })
}

/// Cents for an absolute amount, or `None` when it is negative or the cents
/// overflow `i64`.
pub(crate) fn to_cent_amount(amount: Decimal) -> Option<i64> {
    if amount < Decimal::ZERO {
        return None;
    }
    scale(amount).and_then(|scaled| scaled.to_i64())
}

fn scale(value: Decimal) -> Option<Decimal> {
    value
        .checked_mul(WIRE_SCALE)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
