//! Direct discount types.
//!
//! Existing discounts are read in the platform's query shape, where every
//! union carries a `type` discriminator. Drafts are written in the mutation
//! input shape, where the variant is the single key of an object. See
//! [`DirectDiscountDraft`] for the input encoding.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::DirectDiscountId;
use super::money::{CurrencyCode, Money};

// =============================================================================
// Value and Target
// =============================================================================

/// How much a direct discount takes off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiscountValue {
    /// Percentage discount in parts per ten thousand (1250 = 12.5%).
    Relative { permyriad: u32 },
    /// Fixed amount off, one entry per currency the cart may use.
    Absolute { money: Vec<Money> },
}

impl DiscountValue {
    /// Which kind of value this is.
    #[must_use]
    pub const fn kind(&self) -> DiscountKind {
        match self {
            Self::Relative { .. } => DiscountKind::Relative,
            Self::Absolute { .. } => DiscountKind::Absolute,
        }
    }
}

impl fmt::Display for DiscountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative { permyriad } => {
                let percent = Decimal::new(i64::from(*permyriad), 2).normalize();
                write!(f, "{percent}%")
            }
            Self::Absolute { money } => match money.first() {
                Some(first) => write!(f, "{first}"),
                None => Ok(()),
            },
        }
    }
}

/// Discriminator of a [`DiscountValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountKind {
    Relative,
    Absolute,
}

impl DiscountKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of the cart a direct discount reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiscountTarget {
    /// The cart's total price.
    TotalPrice,
    /// The cart's shipping cost.
    Shipping,
}

impl DiscountTarget {
    /// Wire name of the target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TotalPrice => "totalPrice",
            Self::Shipping => "shipping",
        }
    }
}

impl fmt::Display for DiscountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads a discount's target, mapping an absent, null or unrecognised
/// target to `None`.
fn lenient_target<'de, D>(deserializer: D) -> Result<Option<DiscountTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Tagged {
        #[serde(rename = "type")]
        kind: String,
    }

    Ok(
        Option::<Tagged>::deserialize(deserializer)?.and_then(|tagged| {
            match tagged.kind.as_str() {
                "totalPrice" => Some(DiscountTarget::TotalPrice),
                "shipping" => Some(DiscountTarget::Shipping),
                _ => None,
            }
        }),
    )
}

// =============================================================================
// Discounts
// =============================================================================

/// A direct discount already applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDiscount {
    /// Server-assigned ID, stable for the lifetime of the discount.
    pub id: DirectDiscountId,
    /// What the discount reduces. `None` when the platform reports a
    /// target this crate does not model.
    #[serde(
        default,
        deserialize_with = "lenient_target",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<DiscountTarget>,
    /// How much it takes off.
    pub value: DiscountValue,
}

/// An id-less direct discount, as submitted in a replacement list.
///
/// Serializes in the mutation input shape:
///
/// ```json
/// { "target": { "totalPrice": { "dummy": "true" } },
///   "value": { "relative": { "permyriad": 1250 } } }
/// ```
///
/// Target-less drafts omit the `target` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "input::DirectDiscountDraftInput")]
pub struct DirectDiscountDraft {
    /// What the discount reduces, if known.
    pub target: Option<DiscountTarget>,
    /// How much it takes off.
    pub value: DiscountValue,
}

mod input {
    //! Mutation input shapes. Only the serializer uses these.

    use serde::Serialize;

    use super::{CurrencyCode, DirectDiscountDraft, DiscountTarget, DiscountValue};

    // Input objects must carry at least one field.
    const MARKER: &str = "true";

    #[derive(Serialize)]
    pub struct Marker {
        dummy: &'static str,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum TargetInput {
        TotalPrice(Marker),
        Shipping(Marker),
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyInput {
        cent_amount: i64,
        currency_code: CurrencyCode,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum ValueInput {
        Relative { permyriad: u32 },
        Absolute { money: Vec<MoneyInput> },
    }

    #[derive(Serialize)]
    pub struct DirectDiscountDraftInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<TargetInput>,
        value: ValueInput,
    }

    impl From<DiscountTarget> for TargetInput {
        fn from(target: DiscountTarget) -> Self {
            let marker = Marker { dummy: MARKER };
            match target {
                DiscountTarget::TotalPrice => Self::TotalPrice(marker),
                DiscountTarget::Shipping => Self::Shipping(marker),
            }
        }
    }

    impl From<DiscountValue> for ValueInput {
        fn from(value: DiscountValue) -> Self {
            match value {
                DiscountValue::Relative { permyriad } => Self::Relative { permyriad },
                DiscountValue::Absolute { money } => Self::Absolute {
                    money: money
                        .into_iter()
                        .map(|m| MoneyInput {
                            cent_amount: m.cent_amount,
                            currency_code: m.currency_code,
                        })
                        .collect(),
                },
            }
        }
    }

    impl From<DirectDiscountDraft> for DirectDiscountDraftInput {
        fn from(draft: DirectDiscountDraft) -> Self {
            Self {
                target: draft.target.map(TargetInput::from),
                value: draft.value.into(),
            }
        }
    }
}
