//! Data models for Waitless admin API entities.
//!
//! This module contains strongly-typed representations of the shop
//! resource, newtype ID wrappers, the response envelope, filter types,
//! and request DTOs.

mod category;
mod dto;
mod envelope;
mod enums;
mod filter;
mod ids;
mod shop;
mod user;

pub use category::Category;
pub use dto::{CreateShop, ShopPage, UpdateShop};
pub use envelope::{Envelope, Meta, Pagination};
pub use enums::{SubscriptionPlan, SubscriptionStatus};
pub use filter::ShopFilter;
pub use ids::{CategoryId, OwnerId, ShopId, SubscriptionId};
pub use shop::{Owner, Shop, Subscription};
pub use user::AdminUser;
