//! Error types for the discount panel.

use cart_discounts_core::{ConversionError, ValidationErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code the platform uses when a cart update names a stale version.
pub const CONCURRENT_MODIFICATION: &str = "ConcurrentModification";

/// Everything that can stop a submit or removal.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The form has field errors; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Form input could not be converted; nothing was sent.
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// The host rejected the replacement list.
    #[error("Apply failed: {0}")]
    Apply(#[from] ApplyError),
}

/// Extension data attached to an API error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorExtensions {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
}

/// A single error reported by the host's apply operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,
    /// Top-level error code, if any.
    #[serde(default)]
    pub code: Option<String>,
    /// GraphQL extensions, if any.
    #[serde(default)]
    pub extensions: Option<ApiErrorExtensions>,
}

impl ApiError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            extensions: None,
        }
    }

    /// An error with a message and a top-level code.
    #[must_use]
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            extensions: None,
        }
    }

    /// The error code, preferring the one in `extensions`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|e| e.code.as_deref())
            .or(self.code.as_deref())
    }
}

/// The host rejected a replacement list.
#[derive(Debug, Clone, Error)]
#[error("{}", format_api_errors(.errors))]
pub struct ApplyError {
    /// Errors in the order the host reported them.
    pub errors: Vec<ApiError>,
}

impl ApplyError {
    /// Wrap the errors reported by the host.
    #[must_use]
    pub const fn new(errors: Vec<ApiError>) -> Self {
        Self { errors }
    }

    /// Whether the host refused the update because the cart changed meanwhile.
    #[must_use]
    pub fn is_concurrent_modification(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.code() == Some(CONCURRENT_MODIFICATION))
    }
}

impl From<ApiError> for ApplyError {
    fn from(error: ApiError) -> Self {
        Self::new(vec![error])
    }
}

fn format_api_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_error_display() {
        let err = ApplyError::new(vec![
            ApiError::message("Cart not found"),
            ApiError::message("Invalid discount"),
        ]);
        assert_eq!(err.to_string(), "Cart not found; Invalid discount");
        assert_eq!(ApplyError::new(vec![]).to_string(), "unknown error");
    }

    #[test]
    fn test_code_prefers_extensions() {
        let json = r#"{"message":"m","code":"top","extensions":{"code":"nested"}}"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.code(), Some("nested"));

        assert_eq!(ApiError::with_code("m", "top").code(), Some("top"));
        assert_eq!(ApiError::message("m").code(), None);
    }

    #[test]
    fn test_concurrent_modification() {
        let stale = ApplyError::from(ApiError::with_code(
            "Object has a different version than expected",
            CONCURRENT_MODIFICATION,
        ));
        assert!(stale.is_concurrent_modification());
        assert!(!ApplyError::from(ApiError::message("boom")).is_concurrent_modification());
    }

    #[test]
    fn test_panel_error_display() {
        let err = PanelError::from(ApplyError::from(ApiError::message("boom")));
        assert_eq!(err.to_string(), "Apply failed: boom");
    }
}
