//! Cart Discounts Admin - the direct discount panel.
//!
//! This crate wires the pure rules from `cart-discounts-core` to the host
//! platform: it owns the operator's form for one cart, turns a submit or a
//! removal into a full replacement list, and hands that list to the host's
//! apply operation.
//!
//! # Architecture
//!
//! - [`panel`] - Form session for one cart snapshot
//! - [`apply`] - The async seam to the host's "set direct discounts" operation
//! - [`payload`] - Cart update variables for that operation
//! - [`error`] - Panel, apply and API error types
//! - [`notifications`] - Page/side notifications for failed applies
//! - [`config`] - Environment configuration
//! - [`telemetry`] - Tracing and Sentry initialization for binaries
//!
//! Transport is the host's job: nothing here opens a connection.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod apply;
pub mod config;
pub mod error;
pub mod notifications;
pub mod panel;
pub mod payload;
pub mod telemetry;

pub use apply::{ApplyDirectDiscounts, DirectDiscountsUpdate};
pub use config::{ConfigError, LogFormat, PanelConfig, SentryConfig};
pub use error::{ApiError, ApplyError, PanelError};
pub use panel::DirectDiscountPanel;
