//! Add and remove as whole-list replacement.
//!
//! The platform only offers "set the direct discounts of this cart", so adding
//! or removing one discount means re-sending every other discount unchanged.
//! Both functions work from the caller's last known snapshot; two edits made
//! from the same stale snapshot overwrite each other.

use crate::conversion::to_draft_list;
use crate::types::{DirectDiscount, DirectDiscountDraft, DirectDiscountId};

/// The replacement list that adds `draft` after every existing discount.
///
/// No de-duplication: an identical discount may already be on the cart.
#[must_use]
pub fn apply(existing: &[DirectDiscount], draft: DirectDiscountDraft) -> Vec<DirectDiscountDraft> {
    let mut drafts = to_draft_list(existing);
    drafts.push(draft);
    drafts
}

/// The replacement list without the discount identified by `id`.
///
/// An unknown `id` yields the unchanged list.
#[must_use]
pub fn remove(existing: &[DirectDiscount], id: &DirectDiscountId) -> Vec<DirectDiscountDraft> {
    let kept: Vec<DirectDiscount> = existing
        .iter()
        .filter(|discount| discount.id != *id)
        .cloned()
        .collect();
    to_draft_list(&kept)
}
