//! Core types for cart direct discounts.
//!
//! This module provides type-safe wrappers for the cart and discount concepts
//! read from, and written back to, the commerce platform.

pub mod cart;
pub mod discount;
pub mod id;
pub mod money;

pub use cart::CartSnapshot;
pub use discount::{DirectDiscount, DirectDiscountDraft, DiscountKind, DiscountTarget, DiscountValue};
pub use id::*;
pub use money::{CurrencyCode, Money};
