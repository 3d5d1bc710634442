//! The direct discount panel for one cart.
//!
//! The panel holds the operator's form and the last known cart snapshot. A
//! submit runs the whole pipeline:
//!
//! 1. Validate the form; field errors stop here
//! 2. Convert the form into a draft
//! 3. Append it to the existing discounts, re-described as drafts
//! 4. Hand the full list to the apply operation
//! 5. Reset the form once the host accepted the list
//!
//! The panel never refetches. After a successful apply the caller is expected
//! to hand it the new snapshot via [`DirectDiscountPanel::replace_cart`];
//! until then further edits are computed from the old one.

use cart_discounts_core::{
    CartSnapshot, DirectDiscountDraft, DirectDiscountId, DiscountCapabilities, DiscountSummary,
    FormState, ValidationErrors, from_form_to_draft, reconcile, summarize, validate,
};
use tracing::{debug, error, info, instrument, warn};

use crate::apply::{ApplyDirectDiscounts, DirectDiscountsUpdate};
use crate::error::{ApplyError, PanelError};

/// Form session for adding and removing a cart's direct discounts.
#[derive(Debug)]
pub struct DirectDiscountPanel<A> {
    cart: CartSnapshot,
    capabilities: DiscountCapabilities,
    form: FormState,
    initial_form: FormState,
    apply: A,
}

impl<A: ApplyDirectDiscounts> DirectDiscountPanel<A> {
    /// Create a panel with a fresh form for `cart`.
    pub fn new(cart: CartSnapshot, capabilities: DiscountCapabilities, apply: A) -> Self {
        let initial_form = FormState::for_cart(&cart);
        Self {
            cart,
            capabilities,
            form: initial_form.clone(),
            initial_form,
            apply,
        }
    }

    /// The snapshot edits are computed from.
    pub const fn cart(&self) -> &CartSnapshot {
        &self.cart
    }

    pub const fn capabilities(&self) -> DiscountCapabilities {
        self.capabilities
    }

    /// The operator's current input.
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Edit the operator's input.
    pub const fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Whether the form differs from its initial values.
    pub fn is_dirty(&self) -> bool {
        self.form != self.initial_form
    }

    /// Field errors for the current input.
    pub fn errors(&self) -> ValidationErrors {
        validate(&self.form)
    }

    /// Table rows for the discounts on the current snapshot.
    pub fn summaries(&self) -> Vec<DiscountSummary> {
        summarize(&self.cart.direct_discounts)
    }

    /// Discard the operator's input.
    pub fn reset_form(&mut self) {
        self.form = self.initial_form.clone();
    }

    /// Swap in a newer snapshot of the cart.
    ///
    /// The form is re-initialized when the cart's currency changed, since the
    /// money input would otherwise carry the old currency. Otherwise the
    /// operator's input is kept.
    pub fn replace_cart(&mut self, cart: CartSnapshot) {
        let currency_changed =
            cart.total_price.currency_code != self.cart.total_price.currency_code;
        self.cart = cart;

        if currency_changed {
            debug!(
                currency = %self.cart.total_price.currency_code,
                "cart currency changed, re-initializing discount form"
            );
            self.initial_form = FormState::for_cart(&self.cart);
            self.reset_form();
        }
    }

    /// Add the discount described by the form.
    ///
    /// Returns the full list that was sent. The form is reset only when the
    /// host accepted the list.
    ///
    /// # Errors
    ///
    /// - [`PanelError::Validation`] if the form has field errors
    /// - [`PanelError::Conversion`] if the input cannot be converted
    /// - [`PanelError::Apply`] if the host rejected the list
    #[instrument(skip(self), fields(cart_id = %self.cart.id, version = self.cart.version))]
    pub async fn submit(&mut self) -> Result<Vec<DirectDiscountDraft>, PanelError> {
        let errors = validate(&self.form);
        if !errors.is_empty() {
            warn!(%errors, "direct discount form rejected");
            return Err(PanelError::Validation(errors));
        }

        let draft = from_form_to_draft(&self.form, self.capabilities)?;
        let drafts = reconcile::apply(&self.cart.direct_discounts, draft);
        let drafts = self.send(drafts).await?;

        self.reset_form();
        Ok(drafts)
    }

    /// Remove the discount with `id`.
    ///
    /// An unknown `id` still sends the unchanged list. The form is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Apply`] if the host rejected the list.
    #[instrument(skip(self), fields(cart_id = %self.cart.id, version = self.cart.version))]
    pub async fn remove(
        &self,
        id: &DirectDiscountId,
    ) -> Result<Vec<DirectDiscountDraft>, PanelError> {
        if !self.cart.direct_discounts.iter().any(|d| d.id == *id) {
            debug!(%id, "direct discount not on snapshot");
        }

        let drafts = reconcile::remove(&self.cart.direct_discounts, id);
        Ok(self.send(drafts).await?)
    }

    async fn send(
        &self,
        drafts: Vec<DirectDiscountDraft>,
    ) -> Result<Vec<DirectDiscountDraft>, ApplyError> {
        debug!(count = drafts.len(), "sending direct discount list");
        let update = DirectDiscountsUpdate::for_cart(&self.cart, drafts);

        match self.apply.apply_direct_discounts(&update).await {
            Ok(()) => {
                info!(count = update.drafts.len(), "direct discounts applied");
                Ok(update.drafts)
            }
            Err(err) => {
                let event_id = sentry::capture_error(&err);
                error!(
                    error = %err,
                    concurrent_modification = err.is_concurrent_modification(),
                    sentry_event_id = %event_id,
                    "applying direct discounts failed"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cart_discounts_core::{
        CartId, CurrencyCode, DirectDiscount, DiscountTarget, DiscountType, DiscountValue, Money,
        TargetType,
    };

    use super::*;
    use crate::apply::MockApplyDirectDiscounts;
    use crate::error::ApiError;

    /// Records every update and answers with a canned result.
    #[derive(Default)]
    struct Recorder {
        updates: Mutex<Vec<DirectDiscountsUpdate>>,
        fail_with: Option<ApplyError>,
    }

    impl Recorder {
        fn failing(error: ApiError) -> Self {
            Self {
                updates: Mutex::default(),
                fail_with: Some(error.into()),
            }
        }

        fn updates(&self) -> Vec<DirectDiscountsUpdate> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApplyDirectDiscounts for Recorder {
        async fn apply_direct_discounts(
            &self,
            update: &DirectDiscountsUpdate,
        ) -> Result<(), ApplyError> {
            self.updates.lock().unwrap().push(update.clone());
            self.fail_with.clone().map_or(Ok(()), Err)
        }
    }

    fn cart(currency: &str) -> CartSnapshot {
        CartSnapshot {
            id: CartId::new("cart-1"),
            version: 4,
            total_price: Money::from_cents(10_000, CurrencyCode::new(currency)),
            direct_discounts: vec![DirectDiscount {
                id: DirectDiscountId::new("existing"),
                target: Some(DiscountTarget::Shipping),
                value: DiscountValue::Relative { permyriad: 500 },
            }],
            discount_codes: vec![],
            cart_discounts: vec![],
        }
    }

    fn panel(recorder: Recorder) -> DirectDiscountPanel<Recorder> {
        DirectDiscountPanel::new(cart("EUR"), DiscountCapabilities::default(), recorder)
    }

    #[test]
    fn test_new_panel_form_is_clean() {
        let panel = panel(Recorder::default());
        assert!(!panel.is_dirty());
        assert_eq!(panel.form().discount_value_absolute.currency_code, "EUR");
        assert_eq!(panel.summaries().len(), 1);
    }

    #[test]
    fn test_editing_makes_form_dirty() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "10".to_string();
        assert!(panel.is_dirty());
        assert!(panel.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_sends_full_list_and_resets_form() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "12.5".to_string();

        let drafts = panel.submit().await.unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(
            drafts.last().map(|d| &d.value),
            Some(&DiscountValue::Relative { permyriad: 1250 })
        );
        assert!(!panel.is_dirty());

        let updates = panel.apply.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].version, 4);
        assert_eq!(updates[0].drafts, drafts);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_apply() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "150.999".to_string();

        let err = panel.submit().await.unwrap_err();

        let PanelError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let relative = errors.discount_value_relative.unwrap();
        assert!(relative.cart_discount_out_of_boundaries);
        assert!(relative.cart_discount_too_precise);
        assert!(panel.apply.updates().is_empty());
        assert!(panel.is_dirty());
    }

    #[tokio::test]
    async fn test_submit_calls_apply_once_with_snapshot_version() {
        let mut apply = MockApplyDirectDiscounts::new();
        apply
            .expect_apply_direct_discounts()
            .once()
            .withf(|update| {
                update.cart_id.as_str() == "cart-1"
                    && update.version == 4
                    && update.drafts.len() == 2
            })
            .returning(|_| Ok(()));

        let mut panel =
            DirectDiscountPanel::new(cart("EUR"), DiscountCapabilities::default(), apply);
        panel.form_mut().discount_value_relative = "20".to_string();
        panel.submit().await.unwrap();
    }

    #[tokio::test]
    async fn test_conversion_is_never_reached_with_invalid_number() {
        let mut apply = MockApplyDirectDiscounts::new();
        apply.expect_apply_direct_discounts().never();

        let mut panel =
            DirectDiscountPanel::new(cart("EUR"), DiscountCapabilities::default(), apply);
        panel.form_mut().discount_value_relative = "ten".to_string();

        let err = panel.submit().await.unwrap_err();
        let PanelError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.discount_value_relative.unwrap().invalid_number);
    }

    #[tokio::test]
    async fn test_failed_apply_keeps_form() {
        let mut panel = panel(Recorder::failing(ApiError::message("rejected")));
        panel.form_mut().discount_type = DiscountType::Absolute;
        panel.form_mut().discount_value_absolute.amount = "5".to_string();

        let err = panel.submit().await.unwrap_err();

        assert!(matches!(err, PanelError::Apply(_)));
        assert_eq!(panel.form().discount_value_absolute.amount, "5");
        assert_eq!(panel.apply.updates().len(), 1);
    }

    #[tokio::test]
    async fn test_shipping_target_requires_capability() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "1".to_string();
        panel.form_mut().target_type = TargetType::Shipping;
        let drafts = panel.submit().await.unwrap();
        assert_eq!(drafts.last().unwrap().target, Some(DiscountTarget::TotalPrice));

        let mut panel = DirectDiscountPanel::new(
            cart("EUR"),
            DiscountCapabilities::with_shipping_target(),
            Recorder::default(),
        );
        panel.form_mut().discount_value_relative = "1".to_string();
        panel.form_mut().target_type = TargetType::Shipping;
        let drafts = panel.submit().await.unwrap();
        assert_eq!(drafts.last().unwrap().target, Some(DiscountTarget::Shipping));
    }

    #[tokio::test]
    async fn test_remove_sends_remaining_list() {
        let panel = panel(Recorder::default());

        let drafts = panel
            .remove(&DirectDiscountId::new("existing"))
            .await
            .unwrap();
        assert!(drafts.is_empty());

        let drafts = panel.remove(&DirectDiscountId::new("unknown")).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(panel.apply.updates().len(), 2);
    }

    #[test]
    fn test_replace_cart_keeps_input_for_same_currency() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "3".to_string();

        let mut newer = cart("EUR");
        newer.version = 5;
        panel.replace_cart(newer);

        assert_eq!(panel.cart().version, 5);
        assert_eq!(panel.form().discount_value_relative, "3");
    }

    #[test]
    fn test_replace_cart_reinitializes_on_currency_change() {
        let mut panel = panel(Recorder::default());
        panel.form_mut().discount_value_relative = "3".to_string();

        panel.replace_cart(cart("USD"));

        assert_eq!(panel.form().discount_value_relative, "");
        assert_eq!(panel.form().discount_value_absolute.currency_code, "USD");
        assert!(!panel.is_dirty());
    }
}
