//! The site's content queries, written once against [`EntryStore`].
//!
//! Both content sources answer the same questions in the same way; they
//! differ only in where the raw [`EntryCollection`] comes from. Each source
//! implements [`EntryStore::query`] and forwards its
//! [`ContentSource`](super::ContentSource) methods to the functions here.

use super::entries::{self, EntryCollection, LinkIndex, MAX_INCLUDE};
use super::{ContentError, QueryOptions};
use crate::types::{Contact, GlobalSettings, PageFields, Project, content_type};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

/// A structured entries query. Mirrors the subset of the delivery API the
/// site uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub content_type: &'static str,
    /// Equality filters on `fields.<name>`.
    pub field_filters: Vec<(&'static str, String)>,
    pub include: u8,
    pub limit: Option<u32>,
    pub order: Option<&'static str>,
}

impl Query {
    pub fn new(content_type: &'static str) -> Self {
        Self {
            content_type,
            field_filters: Vec::new(),
            include: 0,
            limit: None,
            order: None,
        }
    }

    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.field_filters.push((name, value.into()));
        self
    }

    pub fn include(mut self, include: u8) -> Self {
        self.include = include.min(MAX_INCLUDE);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: &'static str) -> Self {
        self.order = Some(order);
        self
    }

    /// Whether a raw entry satisfies the content type and field filters.
    pub fn matches(&self, entry: &Value) -> bool {
        entries::content_type_id(entry) == Some(self.content_type)
            && self
                .field_filters
                .iter()
                .all(|(name, expected)| entries::field_str(entry, name) == Some(expected.as_str()))
    }
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn query(&self, query: &Query) -> Result<EntryCollection, ContentError>;
}

/// Run `query` and return its first item with links resolved.
async fn first_resolved<S>(store: &S, query: &Query) -> Result<Option<Value>, ContentError>
where
    S: EntryStore + ?Sized,
{
    let collection = store.query(query).await?;
    let index = LinkIndex::from_collection(&collection);
    Ok(collection
        .items
        .first()
        .map(|item| index.resolve(item, query.include)))
}

/// Page fields of the custom page stored under `page_key`.
pub async fn page_fields<S>(
    store: &S,
    page_key: &str,
    options: QueryOptions,
) -> Result<PageFields, ContentError>
where
    S: EntryStore + ?Sized,
{
    // The wrapper's `page` link is one level on its own; `include` counts
    // levels below the page fields.
    let query = Query::new(content_type::CUSTOM_PAGE)
        .field("key", page_key)
        .include(options.include.saturating_add(1))
        .limit(1);

    let wrapper = first_resolved(store, &query)
        .await?
        .ok_or_else(|| ContentError::not_found("custom page", page_key))?;

    let page = wrapper
        .get("fields")
        .and_then(|fields| fields.get("page"))
        .filter(|page| !page.is_null())
        .cloned()
        .ok_or_else(|| ContentError::not_found("custom page content", page_key))?;

    debug!("fetched custom page {page_key}");
    entries::decode_page_fields(page)
}

pub async fn global_settings<S>(store: &S) -> Result<GlobalSettings, ContentError>
where
    S: EntryStore + ?Sized,
{
    let query = Query::new(content_type::GLOBAL_SETTINGS).include(2).limit(1);
    let item = first_resolved(store, &query)
        .await?
        .ok_or_else(|| ContentError::not_found("global settings", content_type::GLOBAL_SETTINGS))?;
    entries::decode(item)
}

pub async fn project<S>(store: &S, slug: &str) -> Result<Project, ContentError>
where
    S: EntryStore + ?Sized,
{
    let query = Query::new(content_type::PROJECT)
        .field("slug", slug)
        .include(2)
        .limit(1);
    let item = first_resolved(store, &query)
        .await?
        .ok_or_else(|| ContentError::not_found("project", slug))?;
    debug!("fetched project {slug}");
    entries::decode(item)
}

pub async fn project_ids<S>(store: &S) -> Result<Vec<String>, ContentError>
where
    S: EntryStore + ?Sized,
{
    let query = Query::new(content_type::PROJECT)
        .limit(1000)
        .order("sys.createdAt");
    let collection = store.query(&query).await?;
    Ok(collection
        .items
        .iter()
        .filter_map(|item| entries::field_str(item, "slug"))
        .map(str::to_string)
        .collect())
}

pub async fn contact<S>(store: &S) -> Result<Contact, ContentError>
where
    S: EntryStore + ?Sized,
{
    let query = Query::new(content_type::CONTACT).limit(1);
    let item = first_resolved(store, &query)
        .await?
        .ok_or_else(|| ContentError::not_found("contact", content_type::CONTACT))?;
    entries::decode(item)
}
