//! Uniform API response envelope and pagination metadata.

use serde::{Deserialize, Serialize};

/// Response wrapper uniformly returned by list/get/create/update/delete
/// operations: `{data, meta?, success, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Operation payload.
    pub data: T,
    /// Metadata, present on list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Pagination details for list responses.
    pub pagination: Pagination,
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of records matching the filter, before paging.
    pub total: u64,
    /// Requested page size.
    pub per_page: u64,
    /// Requested page number, echoed back even when it exceeds
    /// [`Pagination::last_page`] (no clamping).
    pub current_page: u64,
    /// `ceil(total / per_page)`.
    pub last_page: u64,
}

impl Pagination {
    /// Computes pagination metadata for a filtered total.
    ///
    /// The requested page is echoed back unclamped. A `limit` of zero
    /// describes an empty page window and yields `last_page = 0`.
    #[inline]
    #[must_use]
    pub const fn compute(total: u64, page: u64, limit: u64) -> Self {
        let last_page = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            per_page: limit,
            current_page: page,
            last_page,
        }
    }
}
