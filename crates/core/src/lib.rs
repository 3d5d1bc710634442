//! Cart Discounts Core - direct discount rules for cart back-office views.
//!
//! This crate provides the types and pure functions shared by every cart
//! discount component:
//! - `admin` - The discount panel controller that talks to the host platform
//! - `cli` - Command-line tools for inspecting snapshots and building drafts
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no async,
//! no logging. An operator's form input flows through it like this:
//!
//! ```text
//! FormState --validate--> ValidationErrors (empty)
//!           --from_form_to_draft--> DirectDiscountDraft
//!           --reconcile::apply--> Vec<DirectDiscountDraft> (full replacement list)
//! ```
//!
//! # Modules
//!
//! - [`types`] - Money, ids, discount values/targets and the cart snapshot
//! - [`form`] - Ephemeral form state for the "apply direct discount" form
//! - [`validation`] - Form validation with sparse per-field error flags
//! - [`conversion`] - Existing discounts and form input to drafts
//! - [`reconcile`] - Add/remove as whole-list replacement
//! - [`summary`] - Table rows for the applied discounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod capabilities;
pub mod conversion;
pub mod form;
pub mod reconcile;
pub mod summary;
pub mod types;
pub mod validation;

pub use capabilities::DiscountCapabilities;
pub use conversion::{ConversionError, from_form_to_draft, to_draft_list};
pub use form::{AbsoluteInput, DiscountType, FormState, TargetType};
pub use summary::{DiscountSummary, summarize};
pub use types::*;
pub use validation::{AbsoluteValueErrors, RelativeValueErrors, ValidationErrors, validate};
