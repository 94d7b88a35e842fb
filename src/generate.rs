//! Static site generation.
//!
//! Enumerates every route, assembles the routes' page data concurrently
//! through one [`ContentCache`], renders each page with maud, and writes the
//! result under the output directory.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, project cards, "all projects" card,
//!   manifesto, contact footer
//! - **About** (`/about/index.html`): hero, manifesto, team photos, press
//! - **Projects** (`/projects/index.html`): every project card. Also the
//!   page a project page closes back to.
//! - **Project** (`/projects/{slug}/index.html`): stacked cover, hero,
//!   slides, contact and next-project layers, coloured per project
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about/index.html
//! ├── projects/
//! │   ├── index.html
//! │   ├── atlas/index.html
//! │   └── beacon/index.html
//! ├── style.css          # static/style.css with config colours prepended
//! ├── site.js            # static/site.js
//! └── ...                # copy of site.assets_dir, if configured
//! ```
//!
//! Route assembly runs `build.max_concurrent_routes` at a time. Every
//! assembled page is rendered before anything is written, so a failing route
//! fails the build without leaving a half-written site behind.

use crate::cache::{CacheStats, ContentCache};
use crate::components::{
    DocumentOptions, action_card, article_list, base_document, bound_project_card,
    bound_site_footer, bound_site_nav, contact_slide, hero, manifesto, photo_grid,
    privacy_policy, project_cover, project_footer, project_grid, project_hero, project_slide,
};
use crate::config::{self, SiteConfig};
use crate::content::ContentSource;
use crate::props::{
    self, compute_article_props, compute_footer_props, compute_manifesto_props,
    compute_meta_props, compute_photo_props, compute_privacy_props, compute_project_page_props,
    compute_projects_action_card,
};
use crate::routes::{
    AboutData, HomeData, PageData, ProjectData, ProjectsIndexData, Route, RouteError, Routes,
};
use crate::types::{GlobalSettings, Project};
use futures::{StreamExt, TryStreamExt, stream};
use log::{debug, info};
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("route error: {0}")]
    Route(#[from] RouteError),
    #[error("failed to copy assets from {path}: {source}")]
    Assets {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// A page written by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub route: Route,
    /// Path relative to the output directory.
    pub file: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
    pub cache: CacheStats,
}

/// Routes that assembled successfully, without rendering or writing.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub routes: Vec<Route>,
    pub cache: CacheStats,
}

// ============================================================================
// Build
// ============================================================================

pub async fn build_site<S>(
    config: &SiteConfig,
    source: &S,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError>
where
    S: ContentSource + ?Sized,
{
    let cache = ContentCache::new();
    let routes = Routes::new(&cache, source);

    let all = routes.all_routes().await?;
    info!("Assembling {} routes", all.len());

    let mut rendered: Vec<(Route, Markup)> = stream::iter(all)
        .map(|route| render_route(&routes, config, route))
        .buffer_unordered(config::effective_concurrency(&config.build))
        .try_collect()
        .await?;
    rendered.sort_by_key(|(route, _)| route.url_path());

    fs::create_dir_all(output_dir)?;
    let mut pages = Vec::with_capacity(rendered.len());
    for (route, markup) in rendered {
        let file = PathBuf::from(route.output_file());
        let target = output_dir.join(&file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let html = markup.into_string();
        fs::write(&target, &html)?;
        debug!("Generated {}", file.display());
        pages.push(GeneratedPage {
            route,
            file,
            bytes: html.len(),
        });
    }

    fs::write(output_dir.join("style.css"), stylesheet(config))?;
    fs::write(output_dir.join("site.js"), JS)?;

    let assets_copied = match &config.site.assets_dir {
        Some(dir) => copy_assets(Path::new(dir), output_dir)?,
        None => 0,
    };

    let cache = cache.stats();
    info!("Site generated at {} ({cache})", output_dir.display());
    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        assets_copied,
        cache,
    })
}

/// Assemble every route without rendering. Surfaces missing content and
/// schema errors without touching the output directory.
pub async fn check_site<S>(config: &SiteConfig, source: &S) -> Result<CheckReport, GenerateError>
where
    S: ContentSource + ?Sized,
{
    let cache = ContentCache::new();
    let routes = Routes::new(&cache, source);
    let all = routes.all_routes().await?;

    stream::iter(all.iter())
        .map(|route| routes.assemble(route))
        .buffer_unordered(config::effective_concurrency(&config.build))
        .try_for_each(|_| async { Ok(()) })
        .await?;

    Ok(CheckReport {
        routes: all,
        cache: cache.stats(),
    })
}

async fn render_route<S>(
    routes: &Routes<'_, S>,
    config: &SiteConfig,
    route: Route,
) -> Result<(Route, Markup), GenerateError>
where
    S: ContentSource + ?Sized,
{
    let data = routes.assemble(&route).await?;
    let markup = render_page(&data, config);
    Ok((route, markup))
}

pub fn render_page(data: &PageData, config: &SiteConfig) -> Markup {
    match data {
        PageData::Home(home) => render_home(home, config),
        PageData::About(about) => render_about(about, config),
        PageData::Projects(index) => render_projects_index(index, config),
        PageData::Project(project) => render_project(project, config),
    }
}

/// Assembled page data as pretty JSON, for inspecting what a route renders.
pub fn page_data_json(data: &PageData) -> Result<String, GenerateError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Colour custom properties from config followed by the static stylesheet.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Copy the contents of `src` into `dst`, returning the number of files.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|source| GenerateError::Assets {
            path: src.to_path_buf(),
            source,
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Global settings with the configured site name filled in when the CMS
/// leaves it blank.
fn site_settings(settings: &GlobalSettings, config: &SiteConfig) -> GlobalSettings {
    let mut settings = settings.clone();
    if settings.fields.site_name.trim().is_empty() {
        settings.fields.site_name = config.site.name.clone();
    }
    settings
}

fn canonical_url(config: &SiteConfig, route_path: &str) -> Option<String> {
    let base = config.site.base_url.trim_end_matches('/');
    (!base.is_empty()).then(|| format!("{base}{route_path}"))
}

fn project_cards(projects: &[Project], settings: &GlobalSettings) -> Markup {
    html! {
        @for project in projects {
            (bound_project_card(project, settings))
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(data: &HomeData, config: &SiteConfig) -> Markup {
    let page = &data.page;
    let settings = &site_settings(&data.global_settings, config);
    let meta = compute_meta_props(
        "",
        &page.hero_title,
        page.meta_description.as_ref(),
        page.meta_image.as_ref(),
        settings,
    );
    let projects = page
        .projects_list
        .as_ref()
        .map(|list| list.fields.projects.as_slice())
        .unwrap_or_default();
    let manifesto_items: Vec<_> = page.manifesto_items.iter().map(compute_manifesto_props).collect();

    let content = html! {
        (bound_site_nav(settings, None))
        main.home {
            (hero(&page.hero_title, page.hero_copy.as_deref()))
            @if !projects.is_empty() {
                (project_grid(page.projects_title.as_deref(), html! {
                    (project_cards(projects, settings))
                    (action_card(&compute_projects_action_card(settings)))
                }))
            }
            (manifesto(&manifesto_items))
        }
        (bound_site_footer(settings, Some(&data.contact)))
    };

    let options = DocumentOptions {
        canonical_url: canonical_url(config, "/"),
        body_class: Some("home-page"),
        ..DocumentOptions::default()
    };
    base_document(&meta, &options, content)
}

fn render_about(data: &AboutData, config: &SiteConfig) -> Markup {
    let page = &data.page;
    let settings = &site_settings(&data.global_settings, config);
    let meta = compute_meta_props(
        &page.short_name,
        &page.hero_title,
        page.meta_description.as_ref(),
        page.meta_image.as_ref(),
        settings,
    );
    let manifesto_items: Vec<_> = page.manifesto_items.iter().map(compute_manifesto_props).collect();
    let photos = compute_photo_props(&page.photos_grid);
    let articles: Vec<_> = page.articles_items.iter().map(compute_article_props).collect();

    let privacy = compute_privacy_props(page);

    let content = html! {
        (bound_site_nav(settings, Some("about")))
        main.about {
            (hero(&page.hero_title, page.hero_copy.as_deref()))
            (manifesto(&manifesto_items))
            (photo_grid(page.photos_title.as_deref(), &photos))
            (article_list(page.articles_title.as_deref(), &articles))
            (privacy_policy(privacy.as_ref()))
        }
        (bound_site_footer(settings, None))
    };

    let options = DocumentOptions {
        canonical_url: canonical_url(config, "/about/"),
        body_class: Some("about-page"),
        ..DocumentOptions::default()
    };
    base_document(&meta, &options, content)
}

fn render_projects_index(data: &ProjectsIndexData, config: &SiteConfig) -> Markup {
    let page = &data.page;
    let settings = &site_settings(&data.global_settings, config);
    let list = &page.projects_list.fields;
    let short_title = page.short_name.as_deref().unwrap_or_default();
    let hero_title = page
        .hero_title
        .as_deref()
        .or(list.title.as_deref())
        .unwrap_or(short_title);
    let meta = compute_meta_props(
        short_title,
        hero_title,
        page.meta_description.as_ref(),
        page.meta_image.as_ref(),
        settings,
    );

    let content = html! {
        (bound_site_nav(settings, Some("projects")))
        main.projects-index {
            (hero(hero_title, page.hero_copy.as_deref()))
            (project_grid(None, project_cards(&list.projects, settings)))
        }
        (bound_site_footer(settings, None))
    };

    let options = DocumentOptions {
        canonical_url: canonical_url(config, props::PROJECTS_PATH),
        body_class: Some("projects-page"),
        ..DocumentOptions::default()
    };
    base_document(&meta, &options, content)
}

fn render_project(data: &ProjectData, config: &SiteConfig) -> Markup {
    let settings = &site_settings(&data.global_settings, config);
    let project = &data.page_fields.project;
    let page = compute_project_page_props(
        project,
        data.page_fields.section_name(),
        &data.next_project,
        settings,
    );
    let footer = compute_footer_props(settings, None);

    let content = html! {
        a.project-close
            href=(props::PROJECTS_PATH)
            data-close-href=(props::PROJECTS_PATH)
            aria-label="Close" { "×" }
        main.project {
            (project_cover(page.cover.as_ref(), page.stack.cover))
            (project_hero(&page.hero, page.stack.hero))
            @for slide in &page.slides {
                (project_slide(slide))
            }
            (contact_slide(&footer, page.stack.contact))
        }
        (project_footer(&page.next_label, &page.next_project, page.stack.footer))
    };

    let options = DocumentOptions {
        canonical_url: canonical_url(config, &props::project_href(&project.fields.slug)),
        body_class: Some(match page.text_color {
            props::TextColor::Light => "project-page text-light",
            props::TextColor::Dark => "project-page text-dark",
        }),
        body_style: page
            .background_color
            .as_ref()
            .map(|color| format!("--project-bg: {color}")),
    };
    base_document(&page.meta, &options, content)
}

// ============================================================================
// Tests
// ============================================================================
