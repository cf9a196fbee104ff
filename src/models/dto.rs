//! Request DTOs and the domain-level list page.

use serde::Serialize;

use super::{OwnerId, Pagination, Shop};

/// Payload for creating a shop.
///
/// All fields are required and expected to be non-empty; form-level
/// validation happens before dispatch, not in this layer. The server
/// assigns the id, an unverified state, and the default Free/active
/// subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateShop {
    /// Display name.
    pub name: String,
    /// Category name.
    pub category: String,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Id of the owning user.
    pub owner_id: OwnerId,
}

/// Partial payload for updating a shop.
///
/// Unset fields are omitted from the request body and retained
/// server-side (shallow merge).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateShop {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateShop {
    /// Creates an empty update that changes nothing.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new name.
    #[inline]
    #[must_use]
    pub fn name<T: Into<String>>(mut self, value: T) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Sets the new category.
    #[inline]
    #[must_use]
    pub fn category<T: Into<String>>(mut self, value: T) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Sets the new address.
    #[inline]
    #[must_use]
    pub fn address<T: Into<String>>(mut self, value: T) -> Self {
        self.address = Some(value.into());
        self
    }

    /// Sets the new phone number.
    #[inline]
    #[must_use]
    pub fn phone<T: Into<String>>(mut self, value: T) -> Self {
        self.phone = Some(value.into());
        self
    }
}

/// One page of shop list results with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopPage {
    /// Shops on the current page.
    pub shops: Vec<Shop>,
    /// Pagination metadata for the filtered collection.
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_shop_serializes_all_fields() {
        let dto = CreateShop {
            name: "Prime Cuts".to_owned(),
            category: "Barbershop".to_owned(),
            address: "12 Main St".to_owned(),
            phone: "+1-555-0112".to_owned(),
            owner_id: OwnerId::new(3),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["name"], "Prime Cuts");
        assert_eq!(json["owner_id"], 3);
    }

    #[test]
    fn update_shop_omits_unset_fields() {
        let dto = UpdateShop::new().name("Renamed");
        let json = serde_json::to_string(&dto).unwrap();
        assert_eq!(json, r#"{"name":"Renamed"}"#);
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let json = serde_json::to_string(&UpdateShop::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
