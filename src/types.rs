//! Typed content schema shared by the content sources, the route assemblers,
//! and the view-model mappers.
//!
//! Contentful hands back every entry as `{ sys, fields }`. Linked entries and
//! assets are resolved in place before deserialization (see
//! [`content::entries`](crate::content::entries)), so a field that links to
//! another entry deserializes straight into an [`Entry<T>`]. Links that could
//! not be resolved arrive as `null` and land in `Option::None`, or are
//! dropped from lists.
//!
//! Field names follow the CMS (`camelCase`); Rust names follow Rust.

use serde::{Deserialize, Serialize};

/// Content type ids as configured in the CMS space.
pub mod content_type {
    pub const CUSTOM_PAGE: &str = "customPage";
    pub const GLOBAL_SETTINGS: &str = "globalSettings";
    pub const PROJECT: &str = "project";
    pub const CONTACT: &str = "contact";
    pub const PAGE_HOME: &str = "pageHome";
    pub const PAGE_PEOPLE: &str = "pagePeople";
    pub const PAGE_PROJECT: &str = "pageProject";
}

// ============================================================================
// Envelope types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentTypeLink>,
}

impl Sys {
    /// Content type id of an entry (`None` for assets).
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(|ct| ct.sys.id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeLink {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSys {
    pub id: String,
}

/// A CMS entry: identity plus typed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub sys: Sys,
    pub fields: T,
}

/// A media asset. Every part of the file description is optional because
/// assets can be half-uploaded or unpublished in the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub details: Option<AssetDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDetails {
    #[serde(default)]
    pub image: Option<ImageDimensions>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

// ============================================================================
// Projects
// ============================================================================

pub type Project = Entry<ProjectFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub slug: String,
    pub client_name: String,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub card_title: Option<String>,
    #[serde(default)]
    pub card_color: Option<String>,
    #[serde(default)]
    pub card_text_color: Option<String>,
    #[serde(default)]
    pub card_image: Option<Asset>,
    #[serde(default)]
    pub coming_soon: Option<bool>,
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_copy: Option<String>,
    /// Page background colour of the project detail page.
    #[serde(default)]
    pub color: Option<String>,
    /// Text colour hint for the project detail page.
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub meta_image: Option<Asset>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<Asset>,
    #[serde(default)]
    pub slides: Vec<Entry<SlideFields>>,
}

/// Background of a full-height project slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideBackground {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideFields {
    #[serde(default)]
    pub background_color: SlideBackground,
    #[serde(default)]
    pub image: Option<Asset>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsListFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

// ============================================================================
// Shared content blocks
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestoItemFields {
    pub short_text: String,
    /// Markdown.
    #[serde(default)]
    pub long_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub title: String,
    #[serde(default)]
    pub publication: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Identifier used to mark the current section (`"about"`, `"projects"`).
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

// ============================================================================
// Global settings and contact
// ============================================================================

pub type GlobalSettings = Entry<GlobalSettingsFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsFields {
    pub site_name: String,
    #[serde(default)]
    pub navigation: Vec<NavLink>,
    #[serde(default)]
    pub footer_title: Option<String>,
    #[serde(default)]
    pub footer_copy: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub project_card_action: Option<String>,
    #[serde(default)]
    pub projects_card_title: Option<String>,
    #[serde(default)]
    pub projects_card_action: Option<String>,
    #[serde(default)]
    pub next_project_label: Option<String>,
    #[serde(default)]
    pub meta_image: Option<Asset>,
}

pub type Contact = Entry<ContactFields>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// ============================================================================
// Custom pages
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageFields {
    pub hero_title: String,
    #[serde(default)]
    pub hero_copy: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_image: Option<Asset>,
    #[serde(default)]
    pub projects_title: Option<String>,
    #[serde(default)]
    pub projects_list: Option<Entry<ProjectsListFields>>,
    #[serde(default)]
    pub manifesto_items: Vec<Entry<ManifestoItemFields>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeoplePageFields {
    pub short_name: String,
    pub hero_title: String,
    #[serde(default)]
    pub hero_copy: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_image: Option<Asset>,
    #[serde(default)]
    pub photos_title: Option<String>,
    #[serde(default)]
    pub photos_grid: Vec<Asset>,
    #[serde(default)]
    pub manifesto_items: Vec<Entry<ManifestoItemFields>>,
    #[serde(default)]
    pub articles_title: Option<String>,
    #[serde(default)]
    pub articles_items: Vec<Entry<ArticleFields>>,
    #[serde(default)]
    pub privacy_title: Option<String>,
    /// Markdown, closing the about page.
    #[serde(default)]
    pub privacy_policy: Option<String>,
}

/// Shared template for every project detail page and the projects index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplateFields {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_copy: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_image: Option<Asset>,
    pub projects_list: Entry<ProjectsListFields>,
}

/// Page fields, one variant per page content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "fields", rename_all = "camelCase")]
pub enum PageFields {
    Home(HomePageFields),
    People(PeoplePageFields),
    ProjectTemplate(ProjectTemplateFields),
}

impl PageFields {
    pub fn kind(&self) -> &'static str {
        match self {
            PageFields::Home(_) => content_type::PAGE_HOME,
            PageFields::People(_) => content_type::PAGE_PEOPLE,
            PageFields::ProjectTemplate(_) => content_type::PAGE_PROJECT,
        }
    }
}

/// A custom page as returned by the content client: the page's own fields
/// plus the global settings every page renders with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPage {
    pub page_fields: PageFields,
    pub global_settings: GlobalSettings,
}
