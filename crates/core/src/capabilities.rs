//! Feature switches for the discount form.

use serde::{Deserialize, Serialize};

/// What the host's discount form supports.
///
/// The earliest form could only discount the total price; later ones let the
/// operator pick the shipping cost as target. The default is the earliest
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCapabilities {
    /// Whether new drafts take their target from the form's target selector.
    pub supports_shipping_target: bool,
}

impl DiscountCapabilities {
    /// Capabilities with shipping targets enabled.
    #[must_use]
    pub const fn with_shipping_target() -> Self {
        Self {
            supports_shipping_target: true,
        }
    }
}
