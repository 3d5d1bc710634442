//! Rows for the applied direct discounts table.

use serde::{Serialize, Serializer};

use crate::types::{DirectDiscount, DirectDiscountId, DiscountKind, DiscountTarget};

/// One applied direct discount, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSummary {
    /// ID to pass back when removing the discount.
    pub id: DirectDiscountId,
    /// Target name, or null when the platform reported one not modelled here.
    #[serde(serialize_with = "target_name")]
    pub target: Option<DiscountTarget>,
    pub kind: DiscountKind,
    /// Rendered value, e.g. `12.5%` or `10.50 EUR`.
    pub value: String,
}

impl From<&DirectDiscount> for DiscountSummary {
    fn from(discount: &DirectDiscount) -> Self {
        Self {
            id: discount.id.clone(),
            target: discount.target,
            kind: discount.value.kind(),
            value: discount.value.to_string(),
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn target_name<S: Serializer>(
    target: &Option<DiscountTarget>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    target.map(DiscountTarget::as_str).serialize(serializer)
}

/// One row per discount, in cart order.
#[must_use]
pub fn summarize(discounts: &[DirectDiscount]) -> Vec<DiscountSummary> {
    discounts.iter().map(DiscountSummary::from).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{CurrencyCode, DiscountValue, Money};

    #[test]
    fn test_summarize() {
        let discounts = vec![
            DirectDiscount {
                id: DirectDiscountId::new("a"),
                target: Some(DiscountTarget::Shipping),
                value: DiscountValue::Absolute {
                    money: vec![Money::from_cents(1050, CurrencyCode::new("EUR"))],
                },
            },
            DirectDiscount {
                id: DirectDiscountId::new("b"),
                target: Some(DiscountTarget::TotalPrice),
                value: DiscountValue::Relative { permyriad: 250 },
            },
        ];

        assert_eq!(
            serde_json::to_value(summarize(&discounts)).unwrap(),
            json!([
                { "id": "a", "target": "shipping", "kind": "absolute", "value": "10.50 EUR" },
                { "id": "b", "target": "totalPrice", "kind": "relative", "value": "2.5%" }
            ])
        );
    }

    #[test]
    fn test_summary_without_target() {
        let rows = summarize(&[DirectDiscount {
            id: DirectDiscountId::new("c"),
            target: None,
            value: DiscountValue::Relative { permyriad: 1000 },
        }]);

        assert_eq!(
            serde_json::to_value(rows).unwrap(),
            json!([{ "id": "c", "target": null, "kind": "relative", "value": "10%" }])
        );
    }
}
