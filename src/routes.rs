//! Page data assemblers, one per route.
//!
//! Each assembler gathers every content entity its page needs and returns it
//! as one immutable value. Anything more than one route reads goes through
//! the build's [`ContentCache`], so the shared project template is fetched
//! once no matter how many project pages are generated.
//!
//! ## Routes
//!
//! | Route | Content |
//! |-------|---------|
//! | `/` | `customPageHome`, `contact` |
//! | `/about/` | `customPagePeople` |
//! | `/projects/` | `customPageProject` |
//! | `/projects/{slug}/` | `project-{slug}` merged with `customPageProject`, plus the next project |
//!
//! Every custom page is paired with the global settings, which are cached
//! under their own `globalSettings` key and fetched once per build.
//!
//! [`Routes::project_paths`] enumerates every valid `{slug}`. Its fallback
//! policy is fixed to `false`: a slug that is not enumerated is never
//! generated and therefore 404s.

use crate::cache::ContentCache;
use crate::content::{ContentError, ContentSource, QueryOptions};
use crate::types::{
    Contact, GlobalSettings, HomePageFields, PageFields, PeoplePageFields, Project,
    ProjectTemplateFields, content_type,
};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub const HOME_PAGE_KEY: &str = "customPageHome";
pub const PEOPLE_PAGE_KEY: &str = "customPagePeople";
pub const PROJECT_PAGE_KEY: &str = "customPageProject";
pub const PROJECT_IDS_KEY: &str = "projectIds";
pub const CONTACT_KEY: &str = "contact";
pub const GLOBAL_SETTINGS_KEY: &str = "globalSettings";

/// Link depth below the page fields. Three levels reach the images on the
/// project cards of a page's project list (list → project → card image).
const PAGE_INCLUDE: u8 = 3;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("no project with slug `{0}`")]
    NotFound(String),
    #[error("invalid project slug `{0}`: use lowercase letters, digits and dashes")]
    InvalidSlug(String),
    #[error("custom page `{key}` holds a {found} page, expected {expected}")]
    WrongPageKind {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
}

/// A generated route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Projects,
    Project(String),
}

impl Route {
    /// Parse a URL path such as `/projects/atlas/`.
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["about"] => Ok(Route::About),
            ["projects"] => Ok(Route::Projects),
            ["projects", slug] if is_valid_slug(slug) => Ok(Route::Project(slug.to_string())),
            ["projects", slug] => Err(RouteError::InvalidSlug(slug.to_string())),
            _ => Err(RouteError::UnknownRoute(path.to_string())),
        }
    }

    pub fn url_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about/".to_string(),
            Route::Projects => "/projects/".to_string(),
            Route::Project(slug) => format!("/projects/{slug}/"),
        }
    }

    /// Output file relative to the site root.
    pub fn output_file(&self) -> String {
        format!("{}index.html", self.url_path().trim_start_matches('/'))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_path())
    }
}

/// Project slugs are non-empty runs of `[a-z0-9-]`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// The project after `slug` in `projects`, wrapping to the first one past
/// the end. `None` when `slug` is not in the list.
pub fn next_project<'a>(projects: &'a [Project], slug: &str) -> Option<&'a Project> {
    let index = projects.iter().position(|p| p.fields.slug == slug)?;
    projects.get(index + 1).or_else(|| projects.first())
}

// ============================================================================
// Assembled page data
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub page: HomePageFields,
    pub global_settings: GlobalSettings,
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    pub page: PeoplePageFields,
    pub global_settings: GlobalSettings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsIndexData {
    pub page: ProjectTemplateFields,
    pub global_settings: GlobalSettings,
}

/// Project entry merged with the shared project template.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPageFields {
    pub template: ProjectTemplateFields,
    /// The project's own fields, with the template's hero and meta fields
    /// filling in the ones it leaves blank.
    pub project: Project,
}

impl ProjectPageFields {
    pub fn new(template: ProjectTemplateFields, project: Project) -> Self {
        let mut project = project;
        let fields = &mut project.fields;
        inherit(&mut fields.hero_title, &template.hero_title);
        inherit(&mut fields.hero_copy, &template.hero_copy);
        inherit(&mut fields.meta_description, &template.meta_description);
        if fields.meta_image.is_none() {
            fields.meta_image = template.meta_image.clone();
        }
        Self { template, project }
    }

    /// Section name shown next to the client name in the page title.
    pub fn section_name(&self) -> Option<&str> {
        self.template.short_name.as_deref()
    }
}

/// Take `fallback` when `field` is absent or blank.
fn inherit(field: &mut Option<String>, fallback: &Option<String>) {
    if field.as_deref().is_none_or(|value| value.trim().is_empty()) {
        field.clone_from(fallback);
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub page_fields: ProjectPageFields,
    pub next_project: Project,
    pub global_settings: GlobalSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub project_id: String,
}

/// Every parameter set of the project route, plus the fallback policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<ProjectParams>,
    pub fallback: bool,
}

/// Data for any route.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "route", rename_all = "camelCase")]
pub enum PageData {
    Home(HomeData),
    About(AboutData),
    Projects(ProjectsIndexData),
    Project(Box<ProjectData>),
}

// ============================================================================
// Assemblers
// ============================================================================

/// Route assemblers bound to one build's cache and content source.
pub struct Routes<'a, S: ContentSource + ?Sized> {
    cache: &'a ContentCache,
    source: &'a S,
}

impl<'a, S: ContentSource + ?Sized> Routes<'a, S> {
    pub fn new(cache: &'a ContentCache, source: &'a S) -> Self {
        Self { cache, source }
    }

    pub async fn assemble(&self, route: &Route) -> Result<PageData, RouteError> {
        debug!("assembling {route}");
        Ok(match route {
            Route::Home => PageData::Home(self.home().await?),
            Route::About => PageData::About(self.about().await?),
            Route::Projects => PageData::Projects(self.projects_index().await?),
            Route::Project(slug) => PageData::Project(Box::new(self.project(slug).await?)),
        })
    }

    /// All routes of the site: the fixed pages plus one per project.
    pub async fn all_routes(&self) -> Result<Vec<Route>, RouteError> {
        let paths = self.project_paths().await?;
        let mut routes = vec![Route::Home, Route::About, Route::Projects];
        routes.extend(
            paths
                .paths
                .into_iter()
                .map(|params| Route::Project(params.project_id)),
        );
        Ok(routes)
    }

    pub async fn home(&self) -> Result<HomeData, RouteError> {
        let ((page, settings), contact) = futures::try_join!(
            self.custom_page(HOME_PAGE_KEY),
            self.contact()
        )?;
        let PageFields::Home(fields) = page.as_ref() else {
            return Err(wrong_kind(HOME_PAGE_KEY, &page, content_type::PAGE_HOME));
        };
        Ok(HomeData {
            page: fields.clone(),
            global_settings: (*settings).clone(),
            contact: (*contact).clone(),
        })
    }

    pub async fn about(&self) -> Result<AboutData, RouteError> {
        let (page, settings) = self.custom_page(PEOPLE_PAGE_KEY).await?;
        let PageFields::People(fields) = page.as_ref() else {
            return Err(wrong_kind(PEOPLE_PAGE_KEY, &page, content_type::PAGE_PEOPLE));
        };
        Ok(AboutData {
            page: fields.clone(),
            global_settings: (*settings).clone(),
        })
    }

    pub async fn projects_index(&self) -> Result<ProjectsIndexData, RouteError> {
        let (page, settings) = self.custom_page(PROJECT_PAGE_KEY).await?;
        let template = project_template(&page)?;
        Ok(ProjectsIndexData {
            page: template.clone(),
            global_settings: (*settings).clone(),
        })
    }

    /// Project detail data: the project merged with the shared template, and
    /// the project after it in the template's list.
    pub async fn project(&self, slug: &str) -> Result<ProjectData, RouteError> {
        if !is_valid_slug(slug) {
            return Err(RouteError::InvalidSlug(slug.to_string()));
        }

        let (project, (page, settings)) =
            futures::try_join!(self.project_entry(slug), self.custom_page(PROJECT_PAGE_KEY))?;
        let template = project_template(&page)?;

        let next = next_project(&template.projects_list.fields.projects, slug)
            .ok_or_else(|| RouteError::NotFound(slug.to_string()))?;

        Ok(ProjectData {
            next_project: next.clone(),
            page_fields: ProjectPageFields::new(template.clone(), (*project).clone()),
            global_settings: (*settings).clone(),
        })
    }

    /// Every project slug, de-duplicated in CMS order, with `fallback: false`.
    pub async fn project_paths(&self) -> Result<StaticPaths, RouteError> {
        let source = self.source;
        let ids = self
            .cache
            .project_ids
            .fetch(PROJECT_IDS_KEY, || async move {
                source.fetch_project_ids().await.map(Arc::new)
            })
            .await?;

        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(ids.len());
        for id in ids.iter() {
            if !is_valid_slug(id) {
                return Err(RouteError::InvalidSlug(id.clone()));
            }
            if seen.insert(id.as_str()) {
                paths.push(ProjectParams {
                    project_id: id.clone(),
                });
            } else {
                warn!("duplicate project slug `{id}` ignored");
            }
        }
        Ok(StaticPaths {
            paths,
            fallback: false,
        })
    }

    // ------------------------------------------------------------------------
    // Cached fetches
    // ------------------------------------------------------------------------

    /// A custom page's fields and the global settings, each from its own
    /// cache entry.
    async fn custom_page(
        &self,
        key: &'static str,
    ) -> Result<(Arc<PageFields>, Arc<GlobalSettings>), RouteError> {
        let source = self.source;
        let page = self.cache.pages.fetch(key, || async move {
            source
                .fetch_page_fields(key, QueryOptions::include(PAGE_INCLUDE))
                .await
                .map(Arc::new)
        });
        let (page, settings) = futures::try_join!(page, self.global_settings())?;
        Ok((page, settings))
    }

    async fn global_settings(&self) -> Result<Arc<GlobalSettings>, ContentError> {
        let source = self.source;
        self.cache
            .global_settings
            .fetch(GLOBAL_SETTINGS_KEY, || async move {
                source.fetch_global_settings().await.map(Arc::new)
            })
            .await
    }

    async fn project_entry(&self, slug: &str) -> Result<Arc<Project>, RouteError> {
        let source = self.source;
        self.cache
            .projects
            .fetch(&format!("project-{slug}"), || async move {
                source.fetch_project(slug).await.map(Arc::new)
            })
            .await
            .map_err(|err| match err {
                err if err.is_not_found() => RouteError::NotFound(slug.to_string()),
                err => RouteError::Content(err),
            })
    }

    async fn contact(&self) -> Result<Arc<Contact>, RouteError> {
        let source = self.source;
        let contact = self
            .cache
            .contact
            .fetch(CONTACT_KEY, || async move {
                source.fetch_contact().await.map(Arc::new)
            })
            .await?;
        Ok(contact)
    }
}

fn project_template(page: &PageFields) -> Result<&ProjectTemplateFields, RouteError> {
    match page {
        PageFields::ProjectTemplate(template) => Ok(template),
        other => Err(RouteError::WrongPageKind {
            key: PROJECT_PAGE_KEY,
            expected: content_type::PAGE_PROJECT,
            found: other.kind(),
        }),
    }
}

fn wrong_kind(key: &'static str, page: &PageFields, expected: &'static str) -> RouteError {
    RouteError::WrongPageKind {
        key,
        expected,
        found: page.kind(),
    }
}
