//! Enumeration types for constrained subscription values.
//!
//! Plans and statuses are owned by the subscription subsystem; this
//! layer only reads them and forwards them in filters.

use serde::{Deserialize, Serialize};

/// Subscription tier a shop is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionPlan {
    /// Entry tier, assigned to newly created shops.
    #[default]
    Free,
    /// Mid tier.
    Standard,
    /// Top tier.
    Premium,
}

/// Lifecycle state of a shop subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Subscription is current.
    #[default]
    Active,
    /// Subscription lapsed without renewal.
    Expired,
    /// Subscription was cancelled by the owner.
    Cancelled,
}

impl SubscriptionStatus {
    /// Wire representation used in query parameters.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for SubscriptionStatus {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::Free).unwrap(),
            r#""Free""#
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::Premium).unwrap(),
            r#""Premium""#
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Active).unwrap(),
            r#""active""#
        );
        let status: SubscriptionStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, SubscriptionStatus::Cancelled);
    }

    #[test]
    fn status_display_matches_wire_form() {
        assert_eq!(SubscriptionStatus::Expired.to_string(), "expired");
    }

    #[test]
    fn defaults_match_new_shop_state() {
        assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Free);
        assert_eq!(SubscriptionStatus::default(), SubscriptionStatus::Active);
    }
}
