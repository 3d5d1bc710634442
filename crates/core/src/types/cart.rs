//! Cart snapshot as consumed by the discount components.

use serde::{Deserialize, Serialize};

use super::discount::DirectDiscount;
use super::id::CartId;
use super::money::Money;

/// The last known state of a cart.
///
/// Only `total_price` and `direct_discounts` drive discount logic. Discount
/// codes and promotion-engine discounts are carried as raw JSON so a snapshot
/// round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Platform cart ID.
    pub id: CartId,
    /// Optimistic-concurrency version of the snapshot.
    pub version: i64,
    /// Cart total; its currency seeds the absolute discount input.
    pub total_price: Money,
    /// Direct discounts in the order the platform returned them.
    #[serde(default)]
    pub direct_discounts: Vec<DirectDiscount>,
    #[serde(default)]
    pub discount_codes: Vec<serde_json::Value>,
    #[serde(default)]
    pub cart_discounts: Vec<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_minimal_snapshot() {
        let cart: CartSnapshot = serde_json::from_value(json!({
            "id": "cart-1",
            "version": 3,
            "totalPrice": { "centAmount": 4200, "currencyCode": "EUR" }
        }))
        .unwrap();

        assert_eq!(cart.id.as_str(), "cart-1");
        assert_eq!(cart.version, 3);
        assert_eq!(cart.total_price.currency_code.as_str(), "EUR");
        assert!(cart.direct_discounts.is_empty());
        assert!(cart.discount_codes.is_empty());
    }
}
