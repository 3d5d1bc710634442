//! The seam to the host's apply operation.

use async_trait::async_trait;
use cart_discounts_core::{CartId, CartSnapshot, DirectDiscountDraft};

use crate::error::ApplyError;
use crate::payload::{CartUpdateAction, UpdateCartVariables};

/// A full replacement list for one cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDiscountsUpdate {
    pub cart_id: CartId,
    /// Snapshot version the list was computed from. Implementations that
    /// support optimistic concurrency send it along so a stale list is refused.
    pub version: i64,
    /// Every direct discount the cart should have afterwards, in order.
    pub drafts: Vec<DirectDiscountDraft>,
}

impl DirectDiscountsUpdate {
    /// A replacement list computed from `cart`.
    #[must_use]
    pub fn for_cart(cart: &CartSnapshot, drafts: Vec<DirectDiscountDraft>) -> Self {
        Self {
            cart_id: cart.id.clone(),
            version: cart.version,
            drafts,
        }
    }

    /// The update as `updateCart` mutation variables.
    #[must_use]
    pub fn variables(&self) -> UpdateCartVariables<'_> {
        UpdateCartVariables {
            id: &self.cart_id,
            version: self.version,
            actions: vec![CartUpdateAction::SetDirectDiscounts {
                discounts: &self.drafts,
            }],
        }
    }
}

/// Replaces a cart's direct discounts on the host platform.
///
/// The whole list is replaced atomically; there is no partial update.
/// Implementations report rejections as [`ApplyError`] and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplyDirectDiscounts: Send + Sync {
    /// Send the replacement list.
    async fn apply_direct_discounts(
        &self,
        update: &DirectDiscountsUpdate,
    ) -> Result<(), ApplyError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cart_discounts_core::{CurrencyCode, Money};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_for_cart_carries_version() {
        let cart = CartSnapshot {
            id: CartId::new("cart-9"),
            version: 12,
            total_price: Money::from_cents(100, CurrencyCode::new("EUR")),
            direct_discounts: vec![],
            discount_codes: vec![],
            cart_discounts: vec![],
        };

        let update = DirectDiscountsUpdate::for_cart(&cart, vec![]);
        assert_eq!(update.cart_id, cart.id);
        assert_eq!(update.version, 12);
        assert_eq!(
            serde_json::to_value(update.variables()).unwrap(),
            json!({
                "id": "cart-9",
                "version": 12,
                "actions": [{ "setDirectDiscounts": { "discounts": [] } }]
            })
        );
    }
}
