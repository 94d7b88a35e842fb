//! Shared test utilities for the studio-site test suite.
//!
//! Provides the fixture export, small builders for schema values, and a
//! [`CountingSource`] that records every content client call so tests can
//! assert how often the CMS was actually hit.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = CountingSource::new();
//! let cache = ContentCache::new();
//! let routes = Routes::new(&cache, &source);
//! routes.project("atlas").await.unwrap();
//! assert_eq!(source.calls("project:atlas"), 1);
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::content::entries::EntryCollection;
use crate::content::{ContentError, ContentSource, LocalSource, QueryOptions};
use crate::types::{
    Asset, AssetDetails, AssetFields, AssetFile, Contact, ContentTypeLink, Entry, GlobalSettings,
    GlobalSettingsFields, ImageDimensions, LinkSys, NavLink, PageFields, Project, ProjectFields,
    Sys,
};

// =========================================================================
// Fixtures
// =========================================================================

/// The bundled `fixtures/content.json` export.
pub fn sample_export() -> EntryCollection {
    serde_json::from_str(include_str!("../fixtures/content.json")).unwrap()
}

pub fn sample_source() -> LocalSource {
    LocalSource::from_collection(sample_export())
}

// =========================================================================
// Builders
// =========================================================================

fn sys(id: &str, content_type: Option<&str>) -> Sys {
    Sys {
        id: id.to_string(),
        content_type: content_type.map(|ct| ContentTypeLink {
            sys: LinkSys { id: ct.to_string() },
        }),
    }
}

/// An asset titled `title` with the given file URL.
pub fn asset(title: &str, url: &str, dimensions: Option<(u32, u32)>) -> Asset {
    Asset {
        sys: sys(title, None),
        fields: AssetFields {
            title: Some(title.to_string()),
            description: None,
            file: Some(AssetFile {
                url: Some(url.to_string()),
                content_type: Some("image/jpeg".to_string()),
                details: dimensions.map(|(width, height)| AssetDetails {
                    image: Some(ImageDimensions { width, height }),
                }),
            }),
        },
    }
}

/// A minimal project whose client name is `"{slug} client"`.
pub fn project(slug: &str) -> Project {
    Entry {
        sys: sys(slug, Some("project")),
        fields: ProjectFields {
            slug: slug.to_string(),
            client_name: format!("{slug} client"),
            ..ProjectFields::default()
        },
    }
}

/// Global settings for "Test Studio" with Work and About nav links.
pub fn global_settings() -> GlobalSettings {
    Entry {
        sys: sys("settings", Some("globalSettings")),
        fields: GlobalSettingsFields {
            site_name: "Test Studio".to_string(),
            navigation: vec![
                NavLink {
                    label: "Work".to_string(),
                    href: "/projects/".to_string(),
                    key: Some("projects".to_string()),
                },
                NavLink {
                    label: "About".to_string(),
                    href: "/about/".to_string(),
                    key: Some("about".to_string()),
                },
            ],
            ..GlobalSettingsFields::default()
        },
    }
}

// =========================================================================
// Counting content source
// =========================================================================

/// Fixture-backed content source that counts calls per request key.
///
/// Keys: `customPage:<pageKey>`, `globalSettings`, `project:<slug>`,
/// `projectIds`, `contact`.
pub struct CountingSource {
    inner: LocalSource,
    calls: Mutex<HashMap<String, usize>>,
    fail_once: Mutex<HashSet<String>>,
    project_ids: Option<Vec<String>>,
    delay: Duration,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            inner: sample_source(),
            calls: Mutex::new(HashMap::new()),
            fail_once: Mutex::new(HashSet::new()),
            project_ids: None,
            delay: Duration::from_millis(5),
        }
    }

    /// Answer `fetch_project_ids` with `ids` instead of the fixture list.
    pub fn with_project_ids(mut self, ids: &[&str]) -> Self {
        self.project_ids = Some(ids.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Make the next request for `key` fail with a 503.
    pub fn fail_next(&self, key: &str) {
        self.fail_once.lock().insert(key.to_string());
    }

    /// How many times `key` was requested.
    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().get(key).copied().unwrap_or(0)
    }

    async fn record(&self, key: String) -> Result<(), ContentError> {
        *self.calls.lock().entry(key.clone()).or_default() += 1;
        tokio::time::sleep(self.delay).await;
        if self.fail_once.lock().remove(&key) {
            return Err(ContentError::Status {
                status: 503,
                url: key,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for CountingSource {
    async fn fetch_page_fields(
        &self,
        page_key: &str,
        options: QueryOptions,
    ) -> Result<PageFields, ContentError> {
        self.record(format!("customPage:{page_key}")).await?;
        self.inner.fetch_page_fields(page_key, options).await
    }

    async fn fetch_global_settings(&self) -> Result<GlobalSettings, ContentError> {
        self.record("globalSettings".to_string()).await?;
        self.inner.fetch_global_settings().await
    }

    async fn fetch_project(&self, slug: &str) -> Result<Project, ContentError> {
        self.record(format!("project:{slug}")).await?;
        self.inner.fetch_project(slug).await
    }

    async fn fetch_project_ids(&self) -> Result<Vec<String>, ContentError> {
        self.record("projectIds".to_string()).await?;
        match &self.project_ids {
            Some(ids) => Ok(ids.clone()),
            None => self.inner.fetch_project_ids().await,
        }
    }

    async fn fetch_contact(&self) -> Result<Contact, ContentError> {
        self.record("contact".to_string()).await?;
        self.inner.fetch_contact().await
    }
}
