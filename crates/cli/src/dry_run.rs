//! An apply operation that prints the cart update instead of sending it.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use cart_discounts_admin::{ApiError, ApplyDirectDiscounts, ApplyError, DirectDiscountsUpdate};

/// Writes each update's `updateCart` variables as pretty JSON and accepts it.
pub struct DryRun<W> {
    out: Mutex<W>,
}

impl<W> DryRun<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DryRun<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> ApplyDirectDiscounts for DryRun<W> {
    async fn apply_direct_discounts(
        &self,
        update: &DirectDiscountsUpdate,
    ) -> Result<(), ApplyError> {
        self.write(update).map_err(|e| {
            ApplyError::from(ApiError::message(format!("failed to print update: {e}")))
        })
    }
}

impl<W: Write> DryRun<W> {
    fn write(&self, update: &DirectDiscountsUpdate) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("output lock poisoned"))?;
        crate::commands::write_json(&mut *out, &update.variables())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cart_discounts_core::{CartId, DirectDiscountDraft, DiscountTarget, DiscountValue};

    use super::*;

    #[tokio::test]
    async fn test_prints_update_variables() {
        let dry_run = DryRun::new(Vec::new());
        let update = DirectDiscountsUpdate {
            cart_id: CartId::new("cart-1"),
            version: 2,
            drafts: vec![DirectDiscountDraft {
                target: Some(DiscountTarget::TotalPrice),
                value: DiscountValue::Relative { permyriad: 250 },
            }],
        };

        dry_run.apply_direct_discounts(&update).await.unwrap();

        let printed: serde_json::Value =
            serde_json::from_slice(&dry_run.into_inner()).unwrap();
        assert_eq!(printed["id"], "cart-1");
        assert_eq!(printed["version"], 2);
        assert_eq!(
            printed["actions"][0]["setDirectDiscounts"]["discounts"][0]["value"]["relative"]
                ["permyriad"],
            250
        );
    }
}
