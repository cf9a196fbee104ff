//! Composable filter for shop list queries.

use super::{CategoryId, Shop, SubscriptionStatus};

/// Composable filter for listing shops.
///
/// Use builder-style methods to chain multiple criteria. All conditions
/// are conjunctive — a shop must satisfy every set criterion to pass.
/// An unset field means "no constraint on that field".
///
/// # Examples
///
/// ```
/// use waitless_admin_rs::models::{ShopFilter, SubscriptionStatus};
///
/// let filter = ShopFilter::new()
///     .search("caf")
///     .status(SubscriptionStatus::Active);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShopFilter {
    /// Case-insensitive substring matched against shop name, owner name,
    /// and category.
    pub search: Option<String>,
    /// Category the shop must belong to.
    pub category_id: Option<CategoryId>,
    /// Required subscription status.
    pub status: Option<SubscriptionStatus>,
    /// Required verification state.
    pub is_verified: Option<bool>,
}

impl ShopFilter {
    /// Creates an empty filter that matches all shops.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to shops matching a text search.
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to shops in the given category.
    #[inline]
    #[must_use]
    pub const fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    /// Restricts to shops with the given subscription status.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to shops with the given verification state.
    #[inline]
    #[must_use]
    pub const fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    /// Returns `true` when no criterion is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category_id.is_none()
            && self.status.is_none()
            && self.is_verified.is_none()
    }

    /// Returns `true` if the shop satisfies the text-search criterion.
    ///
    /// The term is matched case-insensitively against the shop name,
    /// the owner name, and the category.
    pub(crate) fn matches_search(&self, shop: &Shop) -> bool {
        self.search.as_ref().is_none_or(|term| {
            let needle = term.to_lowercase();
            shop.name.to_lowercase().contains(&needle)
                || shop.owner.name.to_lowercase().contains(&needle)
                || shop.category.to_lowercase().contains(&needle)
        })
    }

    /// Returns `true` if the shop satisfies the status criterion.
    pub(crate) fn matches_status(&self, shop: &Shop) -> bool {
        self.status
            .is_none_or(|status| shop.subscription.status == status)
    }

    /// Returns `true` if the shop satisfies the verification criterion.
    pub(crate) fn matches_verified(&self, shop: &Shop) -> bool {
        self.is_verified
            .is_none_or(|verified| shop.is_verified == verified)
    }

    /// Appends the set criteria as query parameters.
    ///
    /// Keys follow the wire contract: `search`, `category_id`, `status`,
    /// and `isVerified`.
    pub(crate) fn append_query(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(term) = self.search.as_ref() {
            pairs.push(("search", term.clone()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(verified) = self.is_verified {
            pairs.push(("isVerified", verified.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Owner, OwnerId, ShopId, Subscription, SubscriptionId, SubscriptionPlan};
    use chrono::DateTime;

    fn test_shop(name: &str, owner_name: &str, category: &str) -> Shop {
        Shop {
            id: ShopId::new(1),
            name: name.to_owned(),
            address: "1 Main St".to_owned(),
            phone: "+1-555-0100".to_owned(),
            category: category.to_owned(),
            owner: Owner {
                id: OwnerId::new(1),
                name: owner_name.to_owned(),
                email: "owner@example.com".to_owned(),
            },
            is_verified: false,
            subscription: Subscription {
                id: SubscriptionId::new(1),
                plan: SubscriptionPlan::Free,
                status: SubscriptionStatus::Active,
            },
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ShopFilter::new();
        let shop = test_shop("Prime Cuts", "Alex", "Barbershop");
        assert!(filter.is_empty());
        assert!(filter.matches_search(&shop));
        assert!(filter.matches_status(&shop));
        assert!(filter.matches_verified(&shop));
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let filter = ShopFilter::new().search("PRIME");
        assert!(filter.matches_search(&test_shop("Prime Cuts", "Alex", "Barbershop")));
        assert!(!filter.matches_search(&test_shop("Corner Spa", "Alex", "Spa")));
    }

    #[test]
    fn search_matches_owner_name() {
        let filter = ShopFilter::new().search("reed");
        assert!(filter.matches_search(&test_shop("Corner Spa", "Alex Reed", "Spa")));
    }

    #[test]
    fn search_matches_category() {
        let filter = ShopFilter::new().search("barber");
        assert!(filter.matches_search(&test_shop("Prime Cuts", "Alex", "Barbershop")));
    }

    #[test]
    fn status_criterion() {
        let filter = ShopFilter::new().status(SubscriptionStatus::Expired);
        let shop = test_shop("Prime Cuts", "Alex", "Barbershop");
        assert!(!filter.matches_status(&shop));

        let mut expired = shop;
        expired.subscription.status = SubscriptionStatus::Expired;
        assert!(filter.matches_status(&expired));
    }

    #[test]
    fn verified_criterion() {
        let filter = ShopFilter::new().verified(true);
        let shop = test_shop("Prime Cuts", "Alex", "Barbershop");
        assert!(!filter.matches_verified(&shop));

        let mut verified = shop;
        verified.is_verified = true;
        assert!(filter.matches_verified(&verified));
    }

    #[test]
    fn query_pairs_follow_wire_names() {
        let filter = ShopFilter::new()
            .search("caf")
            .category(CategoryId::new(4))
            .status(SubscriptionStatus::Active)
            .verified(false);
        let mut pairs = Vec::new();
        filter.append_query(&mut pairs);
        assert_eq!(
            pairs,
            vec![
                ("search", "caf".to_owned()),
                ("category_id", "4".to_owned()),
                ("status", "active".to_owned()),
                ("isVerified", "false".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_filter_adds_no_query_pairs() {
        let mut pairs = Vec::new();
        ShopFilter::new().append_query(&mut pairs);
        assert!(pairs.is_empty());
    }
}
