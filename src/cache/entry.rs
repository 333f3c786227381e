//! Cache entry state

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle status of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Never fetched, or invalidated
    Idle,
    /// A request is in flight
    Pending,
    /// The last request resolved
    Success,
    /// The last request failed
    Error,
}

impl Status {
    /// Lowercase name used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Pending => "pending",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// The latest known state of one key
///
/// `data` survives a failed request: after an error the entry holds both the
/// failure and the last successful payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry<T, E> {
    /// Current lifecycle status
    pub status: Status,
    /// Payload of the last successful request
    pub data: Option<T>,
    /// Failure of the last request, cleared when a new request starts
    pub error: Option<E>,
    /// Logical timestamp of the last settled request
    pub updated_at: Option<u64>,
    /// Wall-clock time of the last settled request
    pub settled_at: Option<DateTime<Utc>>,
}

impl<T, E> CacheEntry<T, E> {
    /// An entry that has never been fetched
    pub fn idle() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
            updated_at: None,
            settled_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// True when an error is shown alongside data from an earlier success
    pub fn is_stale(&self) -> bool {
        self.is_error() && self.data.is_some()
    }
}

impl<T, E> Default for CacheEntry<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}
