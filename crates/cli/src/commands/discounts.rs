//! Commands over a cart's direct discounts.
//!
//! # Usage
//!
//! ```bash
//! cd-cli add --cart cart.json --form form.yaml [--shipping-target]
//! cd-cli remove --cart cart.json --id <discount-id>
//! cd-cli list --cart cart.json
//! ```
//!
//! `add` and `remove` drive the discount panel against a dry-run apply
//! operation, so stdout receives exactly the cart update a live host would
//! send.

use std::io;
use std::path::Path;

use cart_discounts_admin::{ApplyDirectDiscounts, DirectDiscountPanel};
use cart_discounts_core::{
    CartSnapshot, DirectDiscountDraft, DirectDiscountId, DiscountCapabilities, FormState,
    summarize,
};
use tracing::info;

use super::write_json;
use crate::dry_run::DryRun;
use crate::error::CommandError;
use crate::input;

/// Print the update that adds the discount in `form_path` to the cart.
///
/// # Errors
///
/// Returns an error if a file cannot be read or the form is rejected.
pub async fn add(
    cart_path: &Path,
    form_path: &Path,
    capabilities: DiscountCapabilities,
) -> Result<(), CommandError> {
    let cart: CartSnapshot = input::load(cart_path).await?;
    let form: FormState = input::load(form_path).await?;

    let drafts = add_to_cart(cart, form, capabilities, DryRun::stdout()).await?;
    info!(count = drafts.len(), "Built replacement list");
    Ok(())
}

/// Print the update that removes discount `id` from the cart.
///
/// # Errors
///
/// Returns an error if the cart file cannot be read.
pub async fn remove(
    cart_path: &Path,
    id: DirectDiscountId,
    capabilities: DiscountCapabilities,
) -> Result<(), CommandError> {
    let cart: CartSnapshot = input::load(cart_path).await?;

    let panel = DirectDiscountPanel::new(cart, capabilities, DryRun::stdout());
    let drafts = panel.remove(&id).await?;
    info!(%id, count = drafts.len(), "Built replacement list");
    Ok(())
}

/// Print the summary rows for the cart's direct discounts.
///
/// # Errors
///
/// Returns an error if the cart file cannot be read.
pub async fn list(cart_path: &Path) -> Result<(), CommandError> {
    let cart: CartSnapshot = input::load(cart_path).await?;
    write_json(&mut io::stdout().lock(), &summarize(&cart.direct_discounts))?;
    Ok(())
}

/// Run the panel's submit flow for `form` on `cart`.
///
/// A form without a currency takes the cart's.
async fn add_to_cart<A: ApplyDirectDiscounts>(
    cart: CartSnapshot,
    form: FormState,
    capabilities: DiscountCapabilities,
    apply: A,
) -> Result<Vec<DirectDiscountDraft>, CommandError> {
    let mut panel = DirectDiscountPanel::new(cart, capabilities, apply);

    let currency = panel.form().discount_value_absolute.currency_code.clone();
    *panel.form_mut() = form;
    if panel.form().discount_value_absolute.currency_code.trim().is_empty() {
        panel.form_mut().discount_value_absolute.currency_code = currency;
    }

    Ok(panel.submit().await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cart_discounts_admin::PanelError;
    use cart_discounts_core::{
        CartId, CurrencyCode, DirectDiscount, DiscountTarget, DiscountType, DiscountValue, Money,
        TargetType,
    };

    use super::*;

    fn cart() -> CartSnapshot {
        CartSnapshot {
            id: CartId::new("cart-1"),
            version: 1,
            total_price: Money::from_cents(5_000, CurrencyCode::new("EUR")),
            direct_discounts: vec![DirectDiscount {
                id: DirectDiscountId::new("d-1"),
                target: Some(DiscountTarget::TotalPrice),
                value: DiscountValue::Relative { permyriad: 1000 },
            }],
            discount_codes: vec![],
            cart_discounts: vec![],
        }
    }

    #[tokio::test]
    async fn test_add_fills_currency_from_cart() {
        let mut form = FormState::default();
        form.discount_type = DiscountType::Absolute;
        form.discount_value_absolute.amount = "10.5".to_string();

        let drafts = add_to_cart(
            cart(),
            form,
            DiscountCapabilities::default(),
            DryRun::new(io::sink()),
        )
        .await
        .unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(
            drafts.last().map(|d| &d.value),
            Some(&DiscountValue::Absolute {
                money: vec![Money::from_cents(1050, CurrencyCode::new("EUR"))]
            })
        );
    }

    #[tokio::test]
    async fn test_add_respects_shipping_flag() {
        let form = FormState {
            target_type: TargetType::Shipping,
            discount_value_relative: "5".to_string(),
            ..FormState::default()
        };

        let drafts = add_to_cart(
            cart(),
            form,
            DiscountCapabilities::with_shipping_target(),
            DryRun::new(io::sink()),
        )
        .await
        .unwrap();

        assert_eq!(
            drafts.last().and_then(|d| d.target),
            Some(DiscountTarget::Shipping)
        );
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_form() {
        let err = add_to_cart(
            cart(),
            FormState::default(),
            DiscountCapabilities::default(),
            DryRun::new(io::sink()),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Panel(PanelError::Validation(_))
        ));
    }
}
