//! Rust client library for the Waitless admin API.
//!
//! This crate provides the data-access layer of a Waitless admin
//! panel: an authenticated HTTP client with token refresh, typed shop
//! resource operations, an in-memory mock backend with deterministic
//! sample data, and a stateful browser over the paginated shop list.
//!
//! The backend is chosen once at startup via [`service::ShopBackend`];
//! everything downstream is generic over [`service::ShopService`] and
//! behaves identically in real and mock mode.

pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod notify;
pub mod service;
pub mod session;
