//! Presentation components.
//!
//! Components take props from [`crate::props`] and return maud [`Markup`].
//! They never look at raw CMS fields and never decide colours or image
//! validity themselves; optional props render nothing when absent.
//!
//! The `bound_*` functions are the pre-bound variants: they take raw content,
//! call the matching mapper, and delegate to the plain component.

use crate::props::{
    ActionCardProps, ArticleProps, FooterProps, ImageProps, ManifestoProps, MetaProps, NavProps,
    PhotoProps, PrivacyProps, ProjectCardProps, ProjectHeroProps, SlideProps, TextColor,
    compute_footer_props, compute_nav_props, compute_project_card_props,
};
use crate::types::{Contact, GlobalSettings, Project, SlideBackground};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

pub const STYLESHEET_PATH: &str = "/style.css";
pub const SCRIPT_PATH: &str = "/site.js";

/// Options for the outer document that vary per page.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions<'a> {
    /// Absolute URL of the page, for canonical and social tags.
    pub canonical_url: Option<String>,
    pub body_class: Option<&'a str>,
    /// Inline style on `<body>`, used for per-project page colours.
    pub body_style: Option<String>,
}

/// Renders the base HTML document structure
pub fn base_document(meta: &MetaProps, options: &DocumentOptions, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                @if let Some(description) = &meta.description {
                    meta name="description" content=(description);
                    meta property="og:description" content=(description);
                }
                meta property="og:title" content=(meta.long_title);
                meta property="og:type" content="website";
                @if let Some(url) = &options.canonical_url {
                    link rel="canonical" href=(url);
                    meta property="og:url" content=(url);
                }
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image.src);
                    @if let Some(width) = image.width {
                        meta property="og:image:width" content=(width);
                    }
                    @if let Some(height) = image.height {
                        meta property="og:image:height" content=(height);
                    }
                    meta name="twitter:card" content="summary_large_image";
                }
                link rel="stylesheet" href=(STYLESHEET_PATH);
                script src=(SCRIPT_PATH) defer {}
            }
            body class=[options.body_class] style=[options.body_style.as_deref()] {
                (content)
            }
        }
    }
}

pub fn image(props: &ImageProps, class: Option<&str>) -> Markup {
    html! {
        img class=[class]
            src=(props.src)
            alt=(props.alt)
            width=[props.width]
            height=[props.height]
            loading="lazy";
    }
}

/// Markdown to HTML. Raw HTML in the source is passed through, as the CMS
/// is trusted.
pub fn markdown(source: &str) -> Markup {
    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new(source));
    PreEscaped(body)
}

// ============================================================================
// Site chrome
// ============================================================================

/// Site header from the global settings, marking the `selected` section.
pub fn bound_site_nav(settings: &GlobalSettings, selected: Option<&str>) -> Markup {
    site_nav(&compute_nav_props(settings, selected))
}

pub fn site_nav(props: &NavProps) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (props.site_name) }
            nav.site-nav {
                ul {
                    @for item in &props.items {
                        li class=[item.selected.then_some("current")] {
                            a href=(item.href)
                                aria-current=[item.selected.then_some("page")] { (item.label) }
                        }
                    }
                }
            }
        }
    }
}

fn contact_details(props: &FooterProps) -> Markup {
    html! {
        address.contact-details {
            @if let Some(email) = &props.email {
                a href={ "mailto:" (email) } { (email) }
            }
            @if let Some(phone) = &props.phone {
                a href={ "tel:" (phone.replace(' ', "")) } { (phone) }
            }
            @if let Some(address) = &props.address {
                span { (address) }
            }
        }
    }
}

pub fn bound_site_footer(settings: &GlobalSettings, contact: Option<&Contact>) -> Markup {
    site_footer(&compute_footer_props(settings, contact))
}

pub fn site_footer(props: &FooterProps) -> Markup {
    html! {
        footer.site-footer {
            @if let Some(title) = &props.title {
                h2.footer-title { (title) }
            }
            @if let Some(copy) = &props.copy {
                p.footer-copy { (copy) }
            }
            (contact_details(props))
            @if !props.social.is_empty() {
                ul.social-links {
                    @for link in &props.social {
                        li { a href=(link.href) rel="noopener" { (link.label) } }
                    }
                }
            }
        }
    }
}

pub fn hero(title: &str, copy: Option<&str>) -> Markup {
    html! {
        section.hero {
            h1 { (title) }
            @if let Some(copy) = copy {
                p.hero-copy { (copy) }
            }
        }
    }
}

// ============================================================================
// Content blocks
// ============================================================================

pub fn manifesto(items: &[ManifestoProps]) -> Markup {
    html! {
        @if !items.is_empty() {
            section.manifesto {
                @for item in items {
                    article.manifesto-item id=(item.key) {
                        h3 { (item.short) }
                        @if let Some(long) = &item.long {
                            div.manifesto-long { (markdown(long)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn photo_grid(title: Option<&str>, photos: &[PhotoProps]) -> Markup {
    html! {
        @if !photos.is_empty() {
            section.photo-grid {
                @if let Some(title) = title {
                    h2 { (title) }
                }
                div.photos {
                    @for photo in photos {
                        figure {
                            (image(&photo.image, None))
                            @if let Some(caption) = &photo.title {
                                figcaption { (caption) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn article_list(title: Option<&str>, articles: &[ArticleProps]) -> Markup {
    html! {
        @if !articles.is_empty() {
            section.articles {
                @if let Some(title) = title {
                    h2 { (title) }
                }
                ul {
                    @for article in articles {
                        li.article {
                            @if let Some(img) = &article.image {
                                (image(img, Some("article-image")))
                            }
                            @if let Some(href) = &article.href {
                                a href=(href) rel="noopener" { (article.title) }
                            } @else {
                                span { (article.title) }
                            }
                            @if let Some(publication) = &article.publication {
                                span.publication { (publication) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Privacy notice closing the about page. Renders nothing without a body.
pub fn privacy_policy(props: Option<&PrivacyProps>) -> Markup {
    html! {
        @if let Some(props) = props {
            section.privacy-policy id="privacy" {
                h2 { (props.title) }
                (markdown(&props.body))
            }
        }
    }
}

// ============================================================================
// Cards
// ============================================================================

fn text_class(color: Option<TextColor>) -> Option<&'static str> {
    color.map(|c| match c {
        TextColor::Light => "text-light",
        TextColor::Dark => "text-dark",
    })
}

fn card_body(props: &ProjectCardProps) -> Markup {
    html! {
        @if let Some(img) = &props.background_image {
            (image(img, Some("card-image")))
        }
        div.card-body {
            p.card-client {
                (props.client_name)
                @if let Some(year) = props.year {
                    " " span.card-year { (year) }
                }
            }
            @if let Some(title) = &props.title {
                h3.card-title { (title) }
            }
            @if props.coming_soon {
                span.card-badge { "Coming soon" }
            } @else {
                span.card-action { (props.action_cta) }
            }
        }
    }
}

/// A project card. Coming-soon cards are not links and carry no colours.
pub fn project_card(props: &ProjectCardProps) -> Markup {
    let class = match (props.coming_soon, text_class(props.text_color)) {
        (true, _) => "project-card coming-soon".to_string(),
        (false, Some(text)) => format!("project-card {text}"),
        (false, None) => "project-card".to_string(),
    };
    let style = props
        .background_color
        .as_ref()
        .map(|color| format!("background-color: {color}"));

    html! {
        @match props.href() {
            Some(href) => {
                a class=(class) href=(href) style=[style] data-slug=(props.slug) {
                    (card_body(props))
                }
            }
            None => {
                div class=(class) data-slug=(props.slug) {
                    (card_body(props))
                }
            }
        }
    }
}

/// Card for a raw project entry.
pub fn bound_project_card(project: &Project, settings: &GlobalSettings) -> Markup {
    project_card(&compute_project_card_props(project, settings))
}

pub fn action_card(props: &ActionCardProps) -> Markup {
    html! {
        a.action-card href=(props.href) {
            h3 { (props.title) }
            span.card-action { (props.action_cta) }
        }
    }
}

pub fn project_grid(title: Option<&str>, cards: Markup) -> Markup {
    html! {
        section.projects {
            @if let Some(title) = title {
                h2 { (title) }
            }
            div.project-grid { (cards) }
        }
    }
}

// ============================================================================
// Project page layers
// ============================================================================

fn layer_style(z_index: usize) -> String {
    format!("z-index: {z_index}")
}

pub fn project_cover(cover: Option<&ImageProps>, z_index: usize) -> Markup {
    html! {
        @if let Some(cover) = cover {
            section.layer.project-cover style=(layer_style(z_index)) {
                (image(cover, Some("cover-image")))
            }
        }
    }
}

pub fn project_hero(props: &ProjectHeroProps, z_index: usize) -> Markup {
    html! {
        section.layer.project-hero style=(layer_style(z_index)) {
            p.project-client {
                (props.client_name)
                @if let Some(year) = props.year {
                    " " span.project-year { (year) }
                }
            }
            @if let Some(title) = &props.title {
                h1 { (title) }
            }
            @if let Some(copy) = &props.copy {
                p.hero-copy { (copy) }
            }
        }
    }
}

pub fn project_slide(props: &SlideProps) -> Markup {
    let class = format!(
        "layer project-slide slide-{}",
        match props.background {
            SlideBackground::Light => "light",
            SlideBackground::Dark => "dark",
        }
    );
    html! {
        section class=(class) style=(layer_style(props.index)) {
            @if let Some(img) = &props.image {
                (image(img, Some("slide-image")))
            }
            @if let Some(caption) = &props.caption {
                p.slide-caption { (caption) }
            }
        }
    }
}

pub fn contact_slide(props: &FooterProps, z_index: usize) -> Markup {
    html! {
        section.layer.contact-slide style=(layer_style(z_index)) {
            @if let Some(title) = &props.title {
                h2 { (title) }
            }
            (contact_details(props))
        }
    }
}

/// The closing layer linking to the next project.
pub fn project_footer(label: &str, next: &ProjectCardProps, z_index: usize) -> Markup {
    html! {
        footer.layer.project-footer style=(layer_style(z_index)) {
            p.next-label { (label) }
            (project_card(next))
        }
    }
}
