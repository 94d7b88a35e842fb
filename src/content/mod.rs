//! Content client boundary.
//!
//! Everything the site renders comes from the CMS through the
//! [`ContentSource`] trait. Two implementations exist:
//!
//! | Source | Backing store |
//! |--------|---------------|
//! | [`ContentfulClient`] | Contentful Content Delivery API over HTTPS |
//! | [`LocalSource`] | A JSON export on disk, same shape as a delivery response |
//!
//! Both hand raw CMS payloads to the shared queries in [`query`], which
//! resolve entry and asset links through [`entries`] up to the requested
//! depth and deserialize the result into the typed schema from
//! [`crate::types`]. A payload that does not match the schema is
//! rejected here with [`ContentError::Schema`] rather than reaching the
//! mappers as a half-filled struct.

pub mod contentful;
pub mod entries;
pub mod local;
pub mod query;

pub use contentful::ContentfulClient;
pub use local::LocalSource;

use crate::cache::EmptyKey;
use crate::types::{Contact, CustomPage, GlobalSettings, PageFields, Project};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS responded {status} for {url}")]
    Status { status: u16, url: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },
    #[error("access token missing: set the {0} environment variable")]
    MissingToken(String),
    #[error("{content_type} entry {id} does not match the schema: {source}")]
    Schema {
        content_type: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected page content type: {0}")]
    UnknownPageKind(String),
    #[error(transparent)]
    EmptyKey(#[from] EmptyKey),
}

impl ContentError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        ContentError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

/// Query options for custom pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// How many levels of linked entries to expand.
    pub include: u8,
}

impl QueryOptions {
    pub fn include(include: u8) -> Self {
        Self { include }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        // Contentful's own default depth.
        Self { include: 1 }
    }
}

/// A source of structured site content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch a custom page by its key (e.g. `customPageHome`) together with
    /// the global settings.
    async fn fetch_custom_page(
        &self,
        page_key: &str,
        options: QueryOptions,
    ) -> Result<CustomPage, ContentError> {
        let (page_fields, global_settings) = futures::try_join!(
            self.fetch_page_fields(page_key, options),
            self.fetch_global_settings()
        )?;
        Ok(CustomPage {
            page_fields,
            global_settings,
        })
    }

    /// The fields of the page linked from the custom page `page_key`.
    async fn fetch_page_fields(
        &self,
        page_key: &str,
        options: QueryOptions,
    ) -> Result<PageFields, ContentError>;

    /// The global settings singleton.
    async fn fetch_global_settings(&self) -> Result<GlobalSettings, ContentError>;

    /// Fetch a single project by slug.
    async fn fetch_project(&self, slug: &str) -> Result<Project, ContentError>;

    /// Slugs of every published project.
    async fn fetch_project_ids(&self) -> Result<Vec<String>, ContentError>;

    async fn fetch_contact(&self) -> Result<Contact, ContentError>;
}
