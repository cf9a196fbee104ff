//! Deterministic in-memory shop data for mock mode.
//!
//! [`MockShopStore`] implements [`ShopService`] over a fixed sample set
//! of 50 shops and 10 categories, so the full admin flow can be driven
//! without a backend. Filtering, pagination, and error classes match
//! the real API: a missing id fails with the same not-found error the
//! server would return.

use core::future::{Future, ready};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{Result, WaitlessError};
use crate::models::{
    Category, CategoryId, CreateShop, Owner, OwnerId, Pagination, Shop, ShopFilter, ShopId,
    ShopPage, Subscription, SubscriptionId, SubscriptionPlan, SubscriptionStatus, UpdateShop,
};
use crate::service::ShopService;

/// Category reference set, ids `1..=10` in order.
const CATEGORY_NAMES: [&str; 10] = [
    "Barbershop",
    "Cafe",
    "Spa",
    "Dental Clinic",
    "Gym",
    "Car Wash",
    "Nail Salon",
    "Pet Grooming",
    "Tattoo Studio",
    "Bakery",
];

/// Shop name prefixes; each prefix covers one block of ten shops.
const NAME_PREFIXES: [&str; 5] = ["Prime", "Corner", "Golden", "Urban", "Riverside"];

/// Owner display names, aligned index-wise with [`CATEGORY_NAMES`].
const OWNER_NAMES: [&str; 10] = [
    "Alex Reed",
    "Dana Cole",
    "Sam Lee",
    "Priya Nair",
    "Marco Diaz",
    "Yuki Tanaka",
    "Lena Fischer",
    "Omar Haddad",
    "Grace Chen",
    "Tom Becker",
];

/// Creation timestamp of the first sample shop (2026-01-01T00:00:00Z);
/// each subsequent shop is created one day later.
const SAMPLE_BASE_TIMESTAMP: i64 = 1_767_225_600;

/// Seconds per day, for spacing sample creation dates.
const SECONDS_PER_DAY: i64 = 86_400;

/// Mutable store contents.
#[derive(Debug, Default)]
struct MockState {
    /// All shops, in insertion order.
    shops: Vec<Shop>,
    /// Category reference list.
    categories: Vec<Category>,
    /// Next id to assign. Monotonic: never decreases, so deleted ids
    /// are not reused.
    next_id: i64,
}

/// In-memory [`ShopService`] implementation serving sample data.
#[derive(Debug)]
pub struct MockShopStore {
    /// All state behind a single mutex for thread-safe interior
    /// mutability.
    inner: Mutex<MockState>,
}

impl Default for MockShopStore {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MockShopStore {
    /// Creates an empty store; the first created shop gets id 1.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockState {
                shops: Vec::new(),
                categories: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store pre-populated with the deterministic sample set:
    /// 50 shops across 10 categories, with a spread of subscription
    /// plans, statuses, and verification states.
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self {
            inner: Mutex::new(sample_state()),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, op: impl FnOnce(&mut MockState) -> Result<R>) -> Result<R> {
        let mut state = self.inner.lock().map_err(|err| lock_error(&err))?;
        op(&mut state)
    }

    /// Lists one page of shops matching the filter.
    ///
    /// Criteria are applied in a fixed order (search, category, status,
    /// verification) and are conjunctive; pagination slices the
    /// filtered sequence.
    fn list_sync(&self, page: u32, limit: u32, filter: &ShopFilter) -> Result<ShopPage> {
        self.with_lock(|state| {
            let category_name = filter.category_id.and_then(|id| {
                state
                    .categories
                    .iter()
                    .find(|category| category.id == id)
                    .map(|category| category.name.clone())
            });
            let filtered: Vec<&Shop> = state
                .shops
                .iter()
                .filter(|shop| filter.matches_search(shop))
                .filter(|shop| match (filter.category_id, category_name.as_deref()) {
                    (None, _) => true,
                    (Some(_), Some(name)) => shop.category == name,
                    // An id outside the reference set matches nothing.
                    (Some(_), None) => false,
                })
                .filter(|shop| filter.matches_status(shop))
                .filter(|shop| filter.matches_verified(shop))
                .collect();

            let total = u64::try_from(filtered.len()).unwrap_or(u64::MAX);
            let page_size = usize::try_from(limit).unwrap_or(usize::MAX);
            let offset = usize::try_from(page.saturating_sub(1))
                .unwrap_or(usize::MAX)
                .saturating_mul(page_size);
            let shops = filtered
                .into_iter()
                .skip(offset)
                .take(page_size)
                .cloned()
                .collect();
            Ok(ShopPage {
                shops,
                pagination: Pagination::compute(total, u64::from(page), u64::from(limit)),
            })
        })
    }

    /// Finds a shop by id.
    fn get_sync(&self, id: ShopId) -> Result<Shop> {
        self.with_lock(|state| {
            state
                .shops
                .iter()
                .find(|shop| shop.id == id)
                .cloned()
                .ok_or_else(|| missing_shop(id))
        })
    }

    /// Stores a new shop with the next monotonic id and server-side
    /// defaults: unverified, on the default plan and status.
    fn create_sync(&self, shop: CreateShop) -> Result<Shop> {
        self.with_lock(|state| {
            let id = state.next_id;
            state.next_id = state.next_id.saturating_add(1);
            let created = Shop {
                id: ShopId::new(id),
                name: shop.name,
                address: shop.address,
                phone: shop.phone,
                category: shop.category,
                owner: Owner {
                    id: shop.owner_id,
                    name: format!("Owner {}", shop.owner_id),
                    email: format!("owner{}@waitless.app", shop.owner_id),
                },
                is_verified: false,
                subscription: Subscription {
                    id: SubscriptionId::new(id),
                    plan: SubscriptionPlan::default(),
                    status: SubscriptionStatus::default(),
                },
                created_at: Utc::now(),
            };
            state.shops.push(created.clone());
            Ok(created)
        })
    }

    /// Applies a shallow merge: only the fields set in `changes` are
    /// overwritten.
    fn update_sync(&self, id: ShopId, changes: UpdateShop) -> Result<Shop> {
        self.with_lock(|state| {
            let shop = state
                .shops
                .iter_mut()
                .find(|entry| entry.id == id)
                .ok_or_else(|| missing_shop(id))?;
            if let Some(name) = changes.name {
                shop.name = name;
            }
            if let Some(category) = changes.category {
                shop.category = category;
            }
            if let Some(address) = changes.address {
                shop.address = address;
            }
            if let Some(phone) = changes.phone {
                shop.phone = phone;
            }
            Ok(shop.clone())
        })
    }

    /// Removes a shop. The freed id is never assigned again.
    fn delete_sync(&self, id: ShopId) -> Result<()> {
        self.with_lock(|state| {
            let index = state
                .shops
                .iter()
                .position(|entry| entry.id == id)
                .ok_or_else(|| missing_shop(id))?;
            let _removed: Shop = state.shops.remove(index);
            Ok(())
        })
    }

    /// Sets the verification flag.
    fn set_verified_sync(&self, id: ShopId, verified: bool) -> Result<Shop> {
        self.with_lock(|state| {
            let shop = state
                .shops
                .iter_mut()
                .find(|entry| entry.id == id)
                .ok_or_else(|| missing_shop(id))?;
            shop.is_verified = verified;
            Ok(shop.clone())
        })
    }

    /// Returns the category reference list.
    fn categories_sync(&self) -> Result<Vec<Category>> {
        self.with_lock(|state| Ok(state.categories.clone()))
    }
}

/// Builds the not-found error for a missing shop id, in the same class
/// the real API returns.
fn missing_shop(id: ShopId) -> WaitlessError {
    WaitlessError::not_found(format!("shop {id} not found"))
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> WaitlessError {
    WaitlessError::Store(err.to_string().into())
}

/// Builds the deterministic sample state.
fn sample_state() -> MockState {
    let categories: Vec<Category> = CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| Category {
            id: CategoryId::new(i64::try_from(index).unwrap_or(i64::MAX).saturating_add(1)),
            name: (*name).to_owned(),
        })
        .collect();

    let mut shops = Vec::with_capacity(NAME_PREFIXES.len().saturating_mul(CATEGORY_NAMES.len()));
    for (prefix_index, prefix) in NAME_PREFIXES.iter().enumerate() {
        for (offset, (category, owner_name)) in CATEGORY_NAMES
            .iter()
            .zip(OWNER_NAMES.iter())
            .enumerate()
        {
            let index = prefix_index
                .saturating_mul(CATEGORY_NAMES.len())
                .saturating_add(offset);
            let id = i64::try_from(index).unwrap_or(i64::MAX).saturating_add(1);
            let plan = match index % 3 {
                0 => SubscriptionPlan::Free,
                1 => SubscriptionPlan::Standard,
                _ => SubscriptionPlan::Premium,
            };
            let status = match index % 7 {
                5 => SubscriptionStatus::Expired,
                6 => SubscriptionStatus::Cancelled,
                _ => SubscriptionStatus::Active,
            };
            shops.push(Shop {
                id: ShopId::new(id),
                name: format!("{prefix} {category}"),
                address: format!("{id} Market Street"),
                phone: format!("+1-555-{:04}", 100_usize.saturating_add(index)),
                category: (*category).to_owned(),
                owner: Owner {
                    id: OwnerId::new(id),
                    name: (*owner_name).to_owned(),
                    email: format!("owner{id}@waitless.app"),
                },
                is_verified: index % 2 == 0,
                subscription: Subscription {
                    id: SubscriptionId::new(id),
                    plan,
                    status,
                },
                created_at: sample_created_at(id),
            });
        }
    }

    MockState {
        next_id: i64::try_from(shops.len()).unwrap_or(i64::MAX).saturating_add(1),
        shops,
        categories,
    }
}

/// Creation date for the sample shop with the given id.
fn sample_created_at(id: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(
        SAMPLE_BASE_TIMESTAMP.saturating_add(id.saturating_mul(SECONDS_PER_DAY)),
        0,
    )
    .unwrap_or_default()
}

impl ShopService for MockShopStore {
    #[inline]
    fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &ShopFilter,
    ) -> impl Future<Output = Result<ShopPage>> + Send {
        ready(self.list_sync(page, limit, filter))
    }

    #[inline]
    fn get(&self, id: ShopId) -> impl Future<Output = Result<Shop>> + Send {
        ready(self.get_sync(id))
    }

    #[inline]
    fn create(&self, shop: CreateShop) -> impl Future<Output = Result<Shop>> + Send {
        ready(self.create_sync(shop))
    }

    #[inline]
    fn update(
        &self,
        id: ShopId,
        changes: UpdateShop,
    ) -> impl Future<Output = Result<Shop>> + Send {
        ready(self.update_sync(id, changes))
    }

    #[inline]
    fn delete(&self, id: ShopId) -> impl Future<Output = Result<()>> + Send {
        ready(self.delete_sync(id))
    }

    #[inline]
    fn set_verified(
        &self,
        id: ShopId,
        verified: bool,
    ) -> impl Future<Output = Result<Shop>> + Send {
        ready(self.set_verified_sync(id, verified))
    }

    #[inline]
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send {
        ready(self.categories_sync())
    }
}
