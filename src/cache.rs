//! Memoizing fetch cache for a single build run.
//!
//! Several routes need the same content: every project page reads the shared
//! project template, the projects index reads it again, and path enumeration
//! and the project pages both need the project list. This module makes sure
//! each of those fetches hits the CMS once per build.
//!
//! # Semantics
//!
//! [`FetchCache::fetch`] takes a key and a zero-argument async producer:
//!
//! - **Resolved key**: the stored value is returned, the producer is dropped
//!   without being called.
//! - **Unknown key**: the producer runs once and its value is stored.
//! - **In-flight key**: callers arriving while a producer is running wait
//!   for it and receive the same value. The producer is never invoked twice
//!   concurrently for one key (single-flight).
//! - **Failed producer**: the error goes back to the caller and the key
//!   stays unresolved, so the next call gets a fresh attempt. Failures are
//!   not retried automatically.
//!
//! There is no eviction and no expiry. A cache lives exactly as long as the
//! build that created it ([`ContentCache::new`] at the start of `build`,
//! dropped at the end), which is also why nothing is persisted to disk.
//!
//! # Design
//!
//! Each key owns a `tokio::sync::OnceCell`. The key map itself sits behind a
//! `parking_lot::Mutex` that is only held long enough to fetch or insert the
//! cell, never across an await. Waiting for an in-flight resolution is the
//! `OnceCell`'s job.
//!
//! Values are stored per content kind in typed caches bundled by
//! [`ContentCache`], so lookups never need downcasting.

use crate::types::{Contact, GlobalSettings, PageFields, Project};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Returned by [`FetchCache::fetch`] for an empty key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cache keys must be non-empty")]
pub struct EmptyKey;

/// Key-addressed single-flight cache over values of one type.
pub struct FetchCache<V> {
    name: &'static str,
    slots: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
    hits: AtomicU32,
    fetches: AtomicU32,
    failures: AtomicU32,
}

impl<V: Clone> FetchCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Mutex::new(HashMap::new()),
            hits: AtomicU32::new(0),
            fetches: AtomicU32::new(0),
            failures: AtomicU32::new(0),
        }
    }

    /// Return the value stored under `key`, running `producer` to resolve it
    /// if no value exists yet.
    ///
    /// An empty `key` fails with [`EmptyKey`] and never runs the producer.
    pub async fn fetch<F, Fut, E>(&self, key: &str, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: From<EmptyKey>,
    {
        if key.is_empty() {
            return Err(EmptyKey.into());
        }

        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        if let Some(value) = slot.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("{} cache hit: {key}", self.name);
            return Ok(value.clone());
        }

        let mut invoked = false;
        let result = slot
            .get_or_try_init(|| {
                invoked = true;
                self.fetches.fetch_add(1, Ordering::Relaxed);
                debug!("{} cache miss: {key}", self.name);
                producer()
            })
            .await;

        match result {
            Ok(value) => {
                if !invoked {
                    // Resolved by another caller while we waited.
                    self.hits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(value.clone())
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                debug!("{} cache fetch failed: {key}", self.name);
                Err(err)
            }
        }
    }

    /// Whether `key` holds a resolved value.
    pub fn is_resolved(&self, key: &str) -> bool {
        self.slots
            .lock()
            .get(key)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of resolved keys.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// The caches a build run shares between all of its route assemblers.
pub struct ContentCache {
    pub pages: FetchCache<Arc<PageFields>>,
    pub global_settings: FetchCache<Arc<GlobalSettings>>,
    pub projects: FetchCache<Arc<Project>>,
    pub project_ids: FetchCache<Arc<Vec<String>>>,
    pub contact: FetchCache<Arc<Contact>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self {
            pages: FetchCache::new("page"),
            global_settings: FetchCache::new("global-settings"),
            projects: FetchCache::new("project"),
            project_ids: FetchCache::new("project-ids"),
            contact: FetchCache::new("contact"),
        }
    }

    /// Combined statistics across every content kind.
    pub fn stats(&self) -> CacheStats {
        [
            self.pages.stats(),
            self.global_settings.stats(),
            self.projects.stats(),
            self.project_ids.stats(),
            self.contact.stats(),
        ]
        .into_iter()
        .fold(CacheStats::default(), |acc, s| CacheStats {
            hits: acc.hits + s.hits,
            fetches: acc.fetches + s.fetches,
            failures: acc.failures + s.failures,
        })
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of cache behaviour for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    /// Producer invocations, successful or not.
    pub fetches: u32,
    pub failures: u32,
}

impl CacheStats {
    pub fn total(&self) -> u32 {
        self.hits + self.fetches
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} fetched ({} total)",
                self.hits,
                self.fetches,
                self.total()
            )?;
        } else {
            write!(f, "{} fetched", self.fetches)?;
        }
        if self.failures > 0 {
            write!(f, ", {} failed", self.failures)?;
        }
        Ok(())
    }
}
