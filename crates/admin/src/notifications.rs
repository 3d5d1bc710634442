//! Notifications for apply failures.
//!
//! Validation errors render inline next to the form fields. Errors from the
//! host's apply operation are shown as notifications instead: the first one
//! on the page, any further ones in the side area.

use serde::Serialize;

use crate::error::{ApiError, ApplyError};

/// Error code for a discount code that does not exist.
pub const MISSING_DISCOUNT_CODE: &str = "missingDiscountCode";
/// Error code for a discount code that is no longer valid.
pub const OUTDATED_DISCOUNT_CODE: &str = "outdatedDiscountCode";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Error,
}

/// Where the host shows the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationDomain {
    Page,
    Side,
}

/// A notification for the host to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub domain: NotificationDomain,
    pub text: String,
}

/// One error notification per reported error.
#[must_use]
pub fn notifications_for(error: &ApplyError) -> Vec<Notification> {
    error
        .errors
        .iter()
        .enumerate()
        .map(|(index, e)| Notification {
            kind: NotificationKind::Error,
            domain: if index == 0 {
                NotificationDomain::Page
            } else {
                NotificationDomain::Side
            },
            text: e.message.clone(),
        })
        .collect()
}

/// The first error whose code is one of `codes`.
///
/// Used by the discount code form to show "missing"/"outdated" code errors
/// inline rather than as notifications.
#[must_use]
pub fn find_error_by_codes<'a>(errors: &'a [ApiError], codes: &[&str]) -> Option<&'a ApiError> {
    errors
        .iter()
        .find(|e| e.code().is_some_and(|code| codes.contains(&code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_notification_on_page_rest_on_side() {
        let error = ApplyError::new(vec![
            ApiError::message("first"),
            ApiError::message("second"),
            ApiError::message("third"),
        ]);

        let domains: Vec<_> = notifications_for(&error)
            .into_iter()
            .map(|n| (n.domain, n.text))
            .collect();
        assert_eq!(
            domains,
            vec![
                (NotificationDomain::Page, "first".to_string()),
                (NotificationDomain::Side, "second".to_string()),
                (NotificationDomain::Side, "third".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_errors_no_notifications() {
        assert!(notifications_for(&ApplyError::new(vec![])).is_empty());
    }

    #[test]
    fn test_find_error_by_codes() {
        let errors = vec![
            ApiError::message("no code"),
            ApiError::with_code("other", "InvalidOperation"),
            ApiError::with_code("gone", OUTDATED_DISCOUNT_CODE),
        ];

        let found = find_error_by_codes(&errors, &[MISSING_DISCOUNT_CODE, OUTDATED_DISCOUNT_CODE]);
        assert_eq!(found.map(|e| e.message.as_str()), Some("gone"));
        assert!(find_error_by_codes(&errors, &[MISSING_DISCOUNT_CODE]).is_none());
    }
}
