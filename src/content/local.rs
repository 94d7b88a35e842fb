//! Content source backed by a JSON export on disk.
//!
//! The export uses the delivery response shape: every entry in `items`,
//! every asset in `includes.Asset`. Queries are evaluated in memory, so a
//! site can be built offline, in CI without credentials, or from test
//! fixtures.

use super::entries::{EntryCollection, Includes};
use super::query::{self, EntryStore, Query};
use super::{ContentError, ContentSource, QueryOptions};
use crate::types::{Contact, GlobalSettings, PageFields, Project};
use async_trait::async_trait;
use std::path::Path;

pub struct LocalSource {
    export: EntryCollection,
}

impl LocalSource {
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path)?;
        let export: EntryCollection = serde_json::from_str(&content)?;
        Ok(Self::from_collection(export))
    }

    pub fn from_collection(export: EntryCollection) -> Self {
        Self { export }
    }

    pub fn entry_count(&self) -> usize {
        self.export.items.len()
    }
}

#[async_trait]
impl EntryStore for LocalSource {
    async fn query(&self, query: &Query) -> Result<EntryCollection, ContentError> {
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        let items = self
            .export
            .items
            .iter()
            .filter(|entry| query.matches(entry))
            .take(limit)
            .cloned()
            .collect();

        // Everything in the export is linkable, matched or not.
        Ok(EntryCollection {
            items,
            includes: Includes {
                entries: self
                    .export
                    .items
                    .iter()
                    .chain(&self.export.includes.entries)
                    .cloned()
                    .collect(),
                assets: self.export.includes.assets.clone(),
            },
        })
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    async fn fetch_page_fields(
        &self,
        page_key: &str,
        options: QueryOptions,
    ) -> Result<PageFields, ContentError> {
        query::page_fields(self, page_key, options).await
    }

    async fn fetch_global_settings(&self) -> Result<GlobalSettings, ContentError> {
        query::global_settings(self).await
    }

    async fn fetch_project(&self, slug: &str) -> Result<Project, ContentError> {
        query::project(self, slug).await
    }

    async fn fetch_project_ids(&self) -> Result<Vec<String>, ContentError> {
        query::project_ids(self).await
    }

    async fn fetch_contact(&self) -> Result<Contact, ContentError> {
        query::contact(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_export;
    use tempfile::TempDir;

    fn source() -> LocalSource {
        LocalSource::from_collection(sample_export())
    }

    #[tokio::test]
    async fn fetch_project_resolves_card_image() {
        let project = source().fetch_project("atlas").await.unwrap();
        assert_eq!(project.fields.client_name, "Atlas Bank");
        let image = project.fields.card_image.unwrap();
        assert_eq!(
            image.fields.file.unwrap().url.as_deref(),
            Some("//images.ctfassets.net/space/atlas-card.jpg")
        );
    }

    #[tokio::test]
    async fn fetch_project_unknown_slug_is_not_found() {
        let err = source().fetch_project("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn fetch_project_ids_in_export_order() {
        let ids = source().fetch_project_ids().await.unwrap();
        assert_eq!(ids, vec!["atlas", "beacon", "cobalt"]);
    }

    #[tokio::test]
    async fn fetch_custom_page_decodes_template_and_settings() {
        let page = source()
            .fetch_custom_page("customPageProject", QueryOptions::include(3))
            .await
            .unwrap();
        assert_eq!(page.global_settings.fields.site_name, "Field Studio");
        match page.page_fields {
            PageFields::ProjectTemplate(template) => {
                let slugs: Vec<_> = template
                    .projects_list
                    .fields
                    .projects
                    .iter()
                    .map(|p| p.fields.slug.as_str())
                    .collect();
                assert_eq!(slugs, vec!["atlas", "beacon", "cobalt"]);
            }
            other => panic!("expected project template, got {}", other.kind()),
        }
    }

    #[tokio::test]
    async fn fetch_custom_page_unknown_key_is_not_found() {
        let err = source()
            .fetch_custom_page("customPageBlog", QueryOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fetch_contact() {
        let contact = source().fetch_contact().await.unwrap();
        assert_eq!(contact.fields.email.as_deref(), Some("hello@field.studio"));
    }

    #[tokio::test]
    async fn load_reads_export_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        let json = serde_json::json!({
            "items": sample_export().items,
            "includes": { "Asset": sample_export().includes.assets },
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let source = LocalSource::load(&path).unwrap();
        assert_eq!(source.entry_count(), sample_export().items.len());
        assert!(source.fetch_project("beacon").await.is_ok());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            LocalSource::load(&tmp.path().join("missing.json")),
            Err(ContentError::Io(_))
        ));
    }
}
