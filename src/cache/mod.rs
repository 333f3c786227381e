//! Cache module for de-duplicating API requests
//!
//! This module provides a request cache that runs caller-supplied producers at
//! most once per key at a time and keeps the latest status, payload and error
//! for every key. Failed requests keep the payload of the previous success so
//! callers can keep showing it next to the error.

mod entry;
mod key;
mod manager;

pub use entry::{CacheEntry, Status};
pub use key::{CacheKey, CacheKeyError};
pub use manager::{CacheConfig, Listener, ListenerId, RequestCache, TriggerOutcome};
