//! Cart update variables for the "set direct discounts" operation.
//!
//! Serializes to the shape the platform's `updateCart` mutation takes:
//!
//! ```json
//! { "id": "cart-1", "version": 7,
//!   "actions": [{ "setDirectDiscounts": { "discounts": [] } }] }
//! ```

use cart_discounts_core::{CartId, DirectDiscountDraft};
use serde::Serialize;

/// Variables for one cart update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartVariables<'a> {
    pub id: &'a CartId,
    /// Version the update was computed from.
    pub version: i64,
    pub actions: Vec<CartUpdateAction<'a>>,
}

/// A single cart update action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CartUpdateAction<'a> {
    /// Replace the cart's direct discounts with `discounts`.
    SetDirectDiscounts { discounts: &'a [DirectDiscountDraft] },
}
