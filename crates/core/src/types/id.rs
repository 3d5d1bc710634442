//! Newtype IDs for platform-assigned entity references.
//!
//! The commerce platform hands out opaque string identifiers. Use the
//! `define_id!` macro to wrap them so a cart ID can never be passed where a
//! discount ID is expected.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use cart_discounts_core::define_id;
/// define_id!(LineItemId);
/// define_id!(ShippingMethodId);
///
/// let line_item = LineItemId::new("li-1");
/// let shipping = ShippingMethodId::new("li-1");
///
/// // These are different types, so this won't compile:
/// // let _: LineItemId = shipping;
/// assert_eq!(line_item.as_str(), shipping.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from its platform string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id!(CartId);
define_id!(DirectDiscountId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_string() {
        let id = DirectDiscountId::new("9a3c-dd");
        assert_eq!(id.to_string(), "9a3c-dd");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = CartId::from("cart-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cart-1\"");

        let parsed: CartId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
