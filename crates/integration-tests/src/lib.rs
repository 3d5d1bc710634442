//! Integration tests for cart direct discounts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cart-discounts-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `panel_flow` - Submit/remove flows through the panel and apply seam
//! - `wire_format` - Snapshot in, update payload out
//! - `apply_errors` - Host rejections, notifications and error codes
//!
//! Nothing here talks to a live platform. [`RecordingApply`] stands in for
//! the host's apply operation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use cart_discounts_admin::{ApplyDirectDiscounts, ApplyError, DirectDiscountsUpdate};
use cart_discounts_core::{CartSnapshot, DirectDiscount, DiscountTarget, FormState};

/// Cart snapshot in EUR with one relative and one high-precision absolute
/// discount.
pub const CART_EUR_JSON: &str = include_str!("../fixtures/cart_eur.json");

/// Absolute 10.5 EUR shipping discount form.
pub const FORM_ABSOLUTE_YAML: &str = include_str!("../fixtures/form_absolute.yaml");

/// Parse the EUR cart fixture.
///
/// # Panics
///
/// Panics if the fixture is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn cart_eur() -> CartSnapshot {
    serde_json::from_str(CART_EUR_JSON).expect("cart fixture should parse")
}

/// Parse the absolute discount form fixture.
///
/// # Panics
///
/// Panics if the fixture is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn form_absolute() -> FormState {
    serde_yaml::from_str(FORM_ABSOLUTE_YAML).expect("form fixture should parse")
}

/// Apply operation that records every update and answers from a script.
///
/// Scripted results are consumed in order; once exhausted every update is
/// accepted.
#[derive(Debug, Default)]
pub struct RecordingApply {
    updates: Mutex<Vec<DirectDiscountsUpdate>>,
    script: Mutex<VecDeque<Result<(), ApplyError>>>,
}

impl RecordingApply {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next update with `result`.
    #[must_use]
    pub fn then_reply(self, result: Result<(), ApplyError>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(result);
        self
    }

    /// Every update received so far.
    #[must_use]
    pub fn updates(&self) -> Vec<DirectDiscountsUpdate> {
        self.updates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ApplyDirectDiscounts for &RecordingApply {
    async fn apply_direct_discounts(
        &self,
        update: &DirectDiscountsUpdate,
    ) -> Result<(), ApplyError> {
        self.updates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(update.clone());
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// What the host would store after accepting `update`: each draft becomes a
/// discount with a generated id.
///
/// Drafts without a target land on the total price, as the platform does.
#[must_use]
pub fn accept(cart: &CartSnapshot, update: &DirectDiscountsUpdate) -> CartSnapshot {
    let direct_discounts = update
        .drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| DirectDiscount {
            id: format!("{}-v{}-{index}", cart.id, cart.version + 1).into(),
            target: Some(draft.target.unwrap_or(DiscountTarget::TotalPrice)),
            value: draft.value.clone(),
        })
        .collect();

    CartSnapshot {
        version: cart.version + 1,
        direct_discounts,
        ..cart.clone()
    }
}
