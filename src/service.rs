//! Shop resource operations.
//!
//! [`ShopService`] is the seam between consumers and the data source.
//! Two implementations exist: [`HttpShopService`] talks to the real API
//! through [`AdminClient`], and [`crate::mock::MockShopStore`] serves
//! deterministic sample data. [`ShopBackend`] selects between them once
//! at composition time; consumers hold the chosen value and never ask
//! again.
//!
//! Every failing operation delivers exactly one error notice through
//! the configured [`Notifier`] and then rethrows, so callers can both
//! rely on the user having been told and still branch on the error.

use core::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::client::AdminClient;
use crate::config::Config;
use crate::error::{Result, WaitlessError};
use crate::mock::MockShopStore;
use crate::models::{
    Category, CreateShop, Envelope, Pagination, Shop, ShopFilter, ShopId, ShopPage, UpdateShop,
};
use crate::notify::{Notice, Notifier};
use crate::session::SessionStore;

/// Shop collection endpoint.
const SHOPS_PATH: &str = "shops";

/// Category list endpoint.
const CATEGORIES_PATH: &str = "shops/categories";

/// Data-access operations on the shop resource.
///
/// All methods return `Send` futures so services can be shared across
/// tasks.
pub trait ShopService: Send + Sync {
    /// Loads one page of shops matching the filter.
    fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &ShopFilter,
    ) -> impl Future<Output = Result<ShopPage>> + Send;

    /// Loads a single shop by id.
    fn get(&self, id: ShopId) -> impl Future<Output = Result<Shop>> + Send;

    /// Creates a shop and returns the stored record.
    fn create(&self, shop: CreateShop) -> impl Future<Output = Result<Shop>> + Send;

    /// Applies a partial update and returns the updated record.
    fn update(&self, id: ShopId, changes: UpdateShop)
    -> impl Future<Output = Result<Shop>> + Send;

    /// Deletes a shop.
    fn delete(&self, id: ShopId) -> impl Future<Output = Result<()>> + Send;

    /// Sets the verification flag and returns the updated record.
    fn set_verified(
        &self,
        id: ShopId,
        verified: bool,
    ) -> impl Future<Output = Result<Shop>> + Send;

    /// Loads the category reference list.
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;
}

/// Builds the error notice for a failed operation.
///
/// Uses the server-provided message when the error carries one and the
/// per-operation fallback otherwise.
#[allow(
    clippy::pattern_type_mismatch,
    reason = "matching the borrowed error to read server messages without taking ownership"
)]
pub(crate) fn failure_notice(err: &WaitlessError, fallback: &str) -> Notice {
    let message = match err {
        WaitlessError::Forbidden { message }
        | WaitlessError::NotFound { message }
        | WaitlessError::Validation { message, .. }
        | WaitlessError::Api { message, .. } => message.clone(),
        WaitlessError::Unauthorized
        | WaitlessError::RateLimited
        | WaitlessError::Server { .. }
        | WaitlessError::Network(_)
        | WaitlessError::Serialization(_)
        | WaitlessError::SessionExpired
        | WaitlessError::Store(_) => fallback.to_owned(),
    };
    Notice::error(message)
}

/// Body of the verification toggle request.
#[derive(Debug, Serialize)]
struct VerifyRequest {
    /// Desired verification state.
    #[serde(rename = "isVerified")]
    is_verified: bool,
}

/// [`ShopService`] implementation backed by the real admin API.
#[derive(Debug)]
pub struct HttpShopService<S> {
    /// Authenticated HTTP transport.
    client: AdminClient<S>,
    /// Sink for user-facing error notices.
    notifier: Arc<dyn Notifier>,
}

impl<S> Clone for HttpShopService<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S: SessionStore> HttpShopService<S> {
    /// Creates a service over an existing client.
    #[inline]
    #[must_use]
    pub fn new(client: AdminClient<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Awaits an operation; on failure, delivers one error notice and
    /// rethrows.
    async fn run<T, F: Future<Output = Result<T>>>(&self, fallback: &str, op: F) -> Result<T> {
        match op.await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.notifier.notify(failure_notice(&err, fallback));
                Err(err)
            }
        }
    }

    /// Fetches one page of shops and assembles the domain page.
    async fn list_inner(&self, page: u32, limit: u32, filter: &ShopFilter) -> Result<ShopPage> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        filter.append_query(&mut query);
        let envelope: Envelope<Vec<Shop>> = self.client.get(SHOPS_PATH, &query).await?;
        let pagination = envelope.meta.map_or_else(
            || {
                let total = u64::try_from(envelope.data.len()).unwrap_or(u64::MAX);
                Pagination::compute(total, u64::from(page), u64::from(limit))
            },
            |meta| meta.pagination,
        );
        Ok(ShopPage {
            shops: envelope.data,
            pagination,
        })
    }
}

/// Endpoint for a single shop.
fn shop_path(id: ShopId) -> String {
    format!("{SHOPS_PATH}/{id}")
}

/// Endpoint for a shop's verification flag.
fn verify_path(id: ShopId) -> String {
    format!("{SHOPS_PATH}/{id}/verify")
}

impl<S: SessionStore> ShopService for HttpShopService<S> {
    fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &ShopFilter,
    ) -> impl Future<Output = Result<ShopPage>> + Send {
        self.run("Failed to load shops", self.list_inner(page, limit, filter))
    }

    fn get(&self, id: ShopId) -> impl Future<Output = Result<Shop>> + Send {
        self.run("Failed to load shop", async move {
            let envelope: Envelope<Shop> = self.client.get(&shop_path(id), &[]).await?;
            Ok(envelope.data)
        })
    }

    fn create(&self, shop: CreateShop) -> impl Future<Output = Result<Shop>> + Send {
        self.run("Failed to create shop", async move {
            let envelope: Envelope<Shop> = self.client.post(SHOPS_PATH, &shop).await?;
            Ok(envelope.data)
        })
    }

    fn update(
        &self,
        id: ShopId,
        changes: UpdateShop,
    ) -> impl Future<Output = Result<Shop>> + Send {
        self.run("Failed to update shop", async move {
            let envelope: Envelope<Shop> = self.client.put(&shop_path(id), &changes).await?;
            Ok(envelope.data)
        })
    }

    fn delete(&self, id: ShopId) -> impl Future<Output = Result<()>> + Send {
        self.run("Failed to delete shop", async move {
            let _envelope: Envelope<Option<serde_json::Value>> =
                self.client.delete(&shop_path(id)).await?;
            Ok(())
        })
    }

    fn set_verified(
        &self,
        id: ShopId,
        verified: bool,
    ) -> impl Future<Output = Result<Shop>> + Send {
        self.run("Failed to update verification status", async move {
            let body = VerifyRequest {
                is_verified: verified,
            };
            let envelope: Envelope<Shop> = self.client.patch(&verify_path(id), &body).await?;
            Ok(envelope.data)
        })
    }

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send {
        self.run("Failed to load categories", async move {
            let envelope: Envelope<Vec<Category>> = self.client.get(CATEGORIES_PATH, &[]).await?;
            Ok(envelope.data)
        })
    }
}

/// The shop backend chosen once at composition time.
///
/// Consumers are generic over [`ShopService`] and never know which
/// variant they hold; there is no per-call backend decision anywhere
/// below this point.
#[derive(Debug)]
pub enum ShopBackend<S> {
    /// Operations hit the real admin API.
    Real(HttpShopService<S>),
    /// Operations are served from the in-memory sample data set.
    Mock {
        /// Deterministic in-memory shop store.
        store: MockShopStore,
        /// Sink for user-facing error notices, shared with the real
        /// variant so failures surface identically in both modes.
        notifier: Arc<dyn Notifier>,
    },
}

impl<S: SessionStore> ShopBackend<S> {
    /// Builds the backend the configuration asks for.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(
        config: Config,
        session: Arc<S>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        if config.use_mock_backend {
            Ok(Self::Mock {
                store: MockShopStore::with_sample_data(),
                notifier,
            })
        } else {
            let client = AdminClient::new(config, session)?;
            Ok(Self::Real(HttpShopService::new(client, notifier)))
        }
    }

    /// Awaits a mock-store operation; on failure, delivers one error
    /// notice and rethrows, mirroring the real service.
    async fn run_mock<T, F: Future<Output = Result<T>>>(
        notifier: &Arc<dyn Notifier>,
        fallback: &str,
        op: F,
    ) -> Result<T> {
        match op.await {
            Ok(value) => Ok(value),
            Err(err) => {
                notifier.notify(failure_notice(&err, fallback));
                Err(err)
            }
        }
    }
}

#[allow(
    clippy::pattern_type_mismatch,
    reason = "dispatch matches the borrowed backend variant"
)]
impl<S: SessionStore> ShopService for ShopBackend<S> {
    fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &ShopFilter,
    ) -> impl Future<Output = Result<ShopPage>> + Send {
        async move {
            match self {
                Self::Real(service) => service.list(page, limit, filter).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to load shops", store.list(page, limit, filter))
                        .await
                }
            }
        }
    }

    fn get(&self, id: ShopId) -> impl Future<Output = Result<Shop>> + Send {
        async move {
            match self {
                Self::Real(service) => service.get(id).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to load shop", store.get(id)).await
                }
            }
        }
    }

    fn create(&self, shop: CreateShop) -> impl Future<Output = Result<Shop>> + Send {
        async move {
            match self {
                Self::Real(service) => service.create(shop).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to create shop", store.create(shop)).await
                }
            }
        }
    }

    fn update(
        &self,
        id: ShopId,
        changes: UpdateShop,
    ) -> impl Future<Output = Result<Shop>> + Send {
        async move {
            match self {
                Self::Real(service) => service.update(id, changes).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to update shop", store.update(id, changes))
                        .await
                }
            }
        }
    }

    fn delete(&self, id: ShopId) -> impl Future<Output = Result<()>> + Send {
        async move {
            match self {
                Self::Real(service) => service.delete(id).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to delete shop", store.delete(id)).await
                }
            }
        }
    }

    fn set_verified(
        &self,
        id: ShopId,
        verified: bool,
    ) -> impl Future<Output = Result<Shop>> + Send {
        async move {
            match self {
                Self::Real(service) => service.set_verified(id, verified).await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(
                        notifier,
                        "Failed to update verification status",
                        store.set_verified(id, verified),
                    )
                    .await
                }
            }
        }
    }

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send {
        async move {
            match self {
                Self::Real(service) => service.categories().await,
                Self::Mock { store, notifier } => {
                    Self::run_mock(notifier, "Failed to load categories", store.categories()).await
                }
            }
        }
    }
}
