//! Shop resource model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnerId, ShopId, SubscriptionId, SubscriptionPlan, SubscriptionStatus};

/// A registered business on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Unique identifier, assigned at creation and immutable.
    pub id: ShopId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Category name from the externally managed category set.
    pub category: String,
    /// Owning user, set at creation.
    pub owner: Owner,
    /// Admin verification flag, mutated only via the verify operation.
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
    /// Current subscription; plan and status are read-only here.
    pub subscription: Subscription,
    /// Creation timestamp, set once.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Embedded owner reference on a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Unique owner identifier.
    pub id: OwnerId,
    /// Owner display name.
    pub name: String,
    /// Owner contact email.
    pub email: String,
}

/// Embedded subscription reference on a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription identifier.
    pub id: SubscriptionId,
    /// Subscription tier.
    pub plan: SubscriptionPlan,
    /// Subscription lifecycle state.
    pub status: SubscriptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_shop_wire_format() {
        let json = r#"{
            "id": 12,
            "name": "Prime Barbershop",
            "address": "12 Main St",
            "phone": "+1-555-0112",
            "category": "Barbershop",
            "owner": {"id": 3, "name": "Alex Reed", "email": "alex@example.com"},
            "isVerified": true,
            "subscription": {"id": 12, "plan": "Standard", "status": "active"},
            "createdAt": "2026-01-15T09:30:00Z"
        }"#;
        let shop: Shop = serde_json::from_str(json).unwrap();
        assert_eq!(shop.id, ShopId::new(12));
        assert!(shop.is_verified);
        assert_eq!(shop.owner.email, "alex@example.com");
        assert_eq!(shop.subscription.plan, SubscriptionPlan::Standard);
        assert_eq!(shop.subscription.status, SubscriptionStatus::Active);
    }

    #[test]
    fn serialize_uses_camel_case_for_renamed_fields() {
        let shop = Shop {
            id: ShopId::new(1),
            name: "Corner Spa".to_owned(),
            address: "1 Side St".to_owned(),
            phone: "+1-555-0100".to_owned(),
            category: "Spa".to_owned(),
            owner: Owner {
                id: OwnerId::new(1),
                name: "Sam Lee".to_owned(),
                email: "sam@example.com".to_owned(),
            },
            is_verified: false,
            subscription: Subscription {
                id: SubscriptionId::new(1),
                plan: SubscriptionPlan::Free,
                status: SubscriptionStatus::Active,
            },
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        let json = serde_json::to_string(&shop).unwrap();
        assert!(json.contains(r#""isVerified":false"#));
        assert!(json.contains(r#""createdAt""#));
        let roundtrip: Shop = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, shop);
    }
}
