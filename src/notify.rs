//! User-facing notification seam.
//!
//! The service layer reports every failure (and the browser reports
//! mutation successes) through the [`Notifier`] trait. The embedding
//! application decides how notices reach the user; the library ships a
//! [`TracingNotifier`] that only logs, and a [`RecordingNotifier`] for
//! asserting on notices in tests.

use std::sync::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// A mutation completed.
    Success,
    /// An operation failed.
    Error,
}

/// A single toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable message.
    pub message: String,
}

impl Notice {
    /// Builds a success notice.
    #[inline]
    #[must_use]
    pub fn success<T: Into<String>>(message: T) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Builds an error notice.
    #[inline]
    #[must_use]
    pub fn error<T: Into<String>>(message: T) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices.
///
/// Implementations must be cheap and non-blocking; they are invoked on
/// the request path.
pub trait Notifier: core::fmt::Debug + Send + Sync {
    /// Delivers a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Default notifier that forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    #[inline]
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
    }
}

/// Notifier that records every notice, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    /// Captured notices, in delivery order.
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all notices delivered so far.
    ///
    /// Returns an empty list if the inner lock was poisoned.
    #[inline]
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    #[inline]
    fn notify(&self, notice: Notice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice);
        }
    }
}
