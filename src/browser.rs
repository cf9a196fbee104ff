//! Stateful shop list consumer.
//!
//! [`ShopBrowser`] is the piece an admin UI holds on to: it owns the
//! current page, page size, and filter, keeps the last loaded page of
//! results, and funnels every mutation through a refresh so the list
//! always reflects the store. It is generic over [`ShopService`] and
//! works identically against the real API and the mock store.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Category, CreateShop, Pagination, Shop, ShopFilter, ShopId, ShopPage, UpdateShop};
use crate::notify::{Notice, Notifier};
use crate::service::ShopService;

/// Default page size.
const DEFAULT_LIMIT: u32 = 10;

/// Lifecycle of the shop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    Idle,
    /// A list request is in flight.
    Loading,
    /// The last fetch succeeded; results are current.
    Loaded,
    /// The last fetch failed; the previous results, if any, are stale.
    Failed,
}

/// Stateful browser over the paginated, filterable shop list.
///
/// Mutation methods deliver a success notice and refresh the list;
/// failure notices come from the service layer, so every outcome
/// produces exactly one notice.
#[derive(Debug)]
pub struct ShopBrowser<B> {
    /// Backend chosen at composition time.
    service: B,
    /// Sink for mutation success notices.
    notifier: Arc<dyn Notifier>,
    /// Current page number, 1-based.
    page: u32,
    /// Current page size.
    limit: u32,
    /// Active filter.
    filter: ShopFilter,
    /// Lifecycle of the last list fetch.
    state: LoadState,
    /// Whether a mutation is currently awaited; UIs use this to
    /// disable submit controls.
    mutating: bool,
    /// Last successfully loaded page.
    current: Option<ShopPage>,
    /// Cached category reference list.
    categories: Option<Vec<Category>>,
}

impl<B: ShopService> ShopBrowser<B> {
    /// Creates a browser at page 1 with the default page size and an
    /// empty filter. Nothing is fetched until [`ShopBrowser::refresh`].
    #[inline]
    #[must_use]
    pub fn new(service: B, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            page: 1,
            limit: DEFAULT_LIMIT,
            filter: ShopFilter::new(),
            state: LoadState::Idle,
            mutating: false,
            current: None,
            categories: None,
        }
    }

    /// Current page number.
    #[inline]
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Active filter.
    #[inline]
    #[must_use]
    pub const fn filter(&self) -> &ShopFilter {
        &self.filter
    }

    /// Lifecycle of the last list fetch.
    #[inline]
    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.state
    }

    /// Whether a mutation is currently awaited.
    #[inline]
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        self.mutating
    }

    /// Shops on the last loaded page; empty before the first fetch.
    #[inline]
    #[must_use]
    pub fn shops(&self) -> &[Shop] {
        self.current
            .as_ref()
            .map_or(&[], |page| page.shops.as_slice())
    }

    /// Pagination metadata of the last loaded page.
    #[inline]
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        self.current.as_ref().map(|page| page.pagination)
    }

    /// Re-fetches the current page with the active filter.
    ///
    /// # Errors
    ///
    /// Returns the list error after the service has delivered its
    /// notice; previously loaded results are kept but marked stale.
    pub async fn refresh(&mut self) -> Result<()> {
        self.state = LoadState::Loading;
        let result = self.service.list(self.page, self.limit, &self.filter).await;
        match result {
            Ok(page) => {
                self.current = Some(page);
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err)
            }
        }
    }

    /// Moves to another page and re-fetches.
    ///
    /// # Errors
    ///
    /// Returns the list error; see [`ShopBrowser::refresh`].
    pub async fn set_page(&mut self, page: u32) -> Result<()> {
        self.page = page;
        self.refresh().await
    }

    /// Changes the page size and re-fetches. The current page number is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns the list error; see [`ShopBrowser::refresh`].
    pub async fn set_limit(&mut self, limit: u32) -> Result<()> {
        self.limit = limit;
        self.refresh().await
    }

    /// Replaces the filter, resets to page 1, and re-fetches.
    ///
    /// Any filter change restarts paging from the beginning so the user
    /// never lands on an empty page of a narrower result set.
    ///
    /// # Errors
    ///
    /// Returns the list error; see [`ShopBrowser::refresh`].
    pub async fn set_filter(&mut self, filter: ShopFilter) -> Result<()> {
        self.filter = filter;
        self.page = 1;
        self.refresh().await
    }

    /// Creates a shop, announces success, and refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the creation error after the service has delivered its
    /// notice.
    pub async fn create(&mut self, shop: CreateShop) -> Result<Shop> {
        self.mutating = true;
        let result = self.service.create(shop).await;
        self.mutating = false;
        let created = result?;
        self.notifier.notify(Notice::success("Shop created"));
        self.refresh_after_mutation().await;
        Ok(created)
    }

    /// Updates a shop, announces success, and refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the update error after the service has delivered its
    /// notice.
    pub async fn update(&mut self, id: ShopId, changes: UpdateShop) -> Result<Shop> {
        self.mutating = true;
        let result = self.service.update(id, changes).await;
        self.mutating = false;
        let updated = result?;
        self.notifier.notify(Notice::success("Shop updated"));
        self.refresh_after_mutation().await;
        Ok(updated)
    }

    /// Deletes a shop, announces success, and refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the deletion error after the service has delivered its
    /// notice.
    pub async fn delete(&mut self, id: ShopId) -> Result<()> {
        self.mutating = true;
        let result = self.service.delete(id).await;
        self.mutating = false;
        result?;
        self.notifier.notify(Notice::success("Shop deleted"));
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Sets a shop's verification flag, announces success, and
    /// refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the verification error after the service has delivered
    /// its notice.
    pub async fn set_verified(&mut self, id: ShopId, verified: bool) -> Result<Shop> {
        self.mutating = true;
        let result = self.service.set_verified(id, verified).await;
        self.mutating = false;
        let shop = result?;
        self.notifier
            .notify(Notice::success("Verification status updated"));
        self.refresh_after_mutation().await;
        Ok(shop)
    }

    /// Returns the category reference list, fetching it once and
    /// serving it from cache afterwards.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; failures are not cached, so the next
    /// call retries.
    pub async fn load_categories(&mut self) -> Result<Vec<Category>> {
        if let Some(cached) = self.categories.as_ref() {
            return Ok(cached.clone());
        }
        let categories = self.service.categories().await?;
        self.categories = Some(categories.clone());
        Ok(categories)
    }

    /// Refreshes after a successful mutation. A refresh failure leaves
    /// the list in [`LoadState::Failed`] with its notice already
    /// delivered; the mutation result stands.
    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.refresh().await {
            tracing::debug!(error = %err, "list refresh after mutation failed");
        }
    }
}
