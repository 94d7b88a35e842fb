//! View-model mappers: raw content fields in, component props out.
//!
//! Every function here is pure and synchronous. The rules they share:
//!
//! - A "coming soon" project never carries custom background or text
//!   colours; the card falls back to the component defaults.
//! - Text colour is always derived through [`compute_text_color`]. Nothing
//!   else picks light or dark text.
//! - Image props exist only for assets that pass [`is_valid_image`].
//!   Anything else maps to `None`, never to a placeholder.
//! - Empty strings from the CMS are treated as absent, so components can
//!   pattern-match on `Option` and never emit empty elements.

use crate::types::{
    Asset, Contact, Entry, GlobalSettings, ManifestoItemFields, PeoplePageFields, Project,
    SlideBackground,
};
use serde::Serialize;

/// Default call to action on project cards.
pub const DEFAULT_PROJECT_CTA: &str = "See project";
pub const DEFAULT_NEXT_PROJECT_LABEL: &str = "Next project";
pub const DEFAULT_PROJECTS_CTA: &str = "See all projects";
pub const PROJECTS_PATH: &str = "/projects/";

/// Text colour variant. `Light` text goes on dark backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Light,
    Dark,
}

impl TextColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextColor::Light => "light",
            TextColor::Dark => "dark",
        }
    }
}

/// Map a colour value from the CMS to a text colour.
///
/// Accepts a named choice (`light`/`white`, `dark`/`black`) or a hex
/// background colour (`#rgb`, `#rrggbb`), for which the text colour with
/// the better contrast is picked. Anything else yields `Dark`.
pub fn compute_text_color(value: Option<&str>) -> TextColor {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return TextColor::Dark;
    };
    match value.to_ascii_lowercase().as_str() {
        "light" | "white" => TextColor::Light,
        "dark" | "black" => TextColor::Dark,
        _ => match parse_hex_color(value) {
            Some(rgb) if relative_luminance(rgb) < 0.5 => TextColor::Light,
            _ => TextColor::Dark,
        },
    }
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// WCAG relative luminance in `0.0..=1.0`.
fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// A CMS colour value that is safe to put in CSS: `#rgb` or `#rrggbb`.
/// Anything else is dropped.
pub fn css_color(value: Option<&String>) -> Option<String> {
    present(value).filter(|color| parse_hex_color(color).is_some())
}

/// `Some` only for non-blank strings.
fn present(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageProps {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub alt: String,
}

/// An image is renderable when the asset exists and has a file URL.
pub fn is_valid_image(asset: Option<&Asset>) -> bool {
    asset
        .and_then(|a| a.fields.file.as_ref())
        .and_then(|file| file.url.as_deref())
        .is_some_and(|url| !url.trim().is_empty())
}

/// Renderable props for an asset, or `None` when it fails [`is_valid_image`].
pub fn compute_image_props(asset: Option<&Asset>) -> Option<ImageProps> {
    if !is_valid_image(asset) {
        return None;
    }
    let asset = asset?;
    let file = asset.fields.file.as_ref()?;
    let url = file.url.as_deref()?.trim();
    let src = if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    };
    let dimensions = file.details.as_ref().and_then(|d| d.image);
    let alt = present(asset.fields.description.as_ref())
        .or_else(|| present(asset.fields.title.as_ref()))
        .unwrap_or_default();
    Some(ImageProps {
        src,
        width: dimensions.map(|d| d.width),
        height: dimensions.map(|d| d.height),
        alt,
    })
}

/// Page image when valid, the site default otherwise.
pub fn compute_meta_image(page_image: Option<&Asset>, settings: &GlobalSettings) -> Option<ImageProps> {
    compute_image_props(page_image)
        .or_else(|| compute_image_props(settings.fields.meta_image.as_ref()))
}

// ============================================================================
// Project cards
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCardProps {
    pub slug: String,
    pub client_name: String,
    pub coming_soon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<TextColor>,
    pub action_cta: String,
}

impl ProjectCardProps {
    /// Detail page link. Coming-soon projects have none.
    pub fn href(&self) -> Option<String> {
        (!self.coming_soon).then(|| project_href(&self.slug))
    }
}

pub fn project_href(slug: &str) -> String {
    format!("{PROJECTS_PATH}{slug}/")
}

pub fn compute_project_card_props(project: &Project, settings: &GlobalSettings) -> ProjectCardProps {
    let fields = &project.fields;
    let coming_soon = fields.coming_soon.unwrap_or(false);
    let card_color = css_color(fields.card_color.as_ref());
    let text_color = compute_text_color(
        fields
            .card_text_color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(card_color.as_deref()),
    );

    ProjectCardProps {
        slug: fields.slug.clone(),
        client_name: fields.client_name.clone(),
        coming_soon,
        year: fields.year,
        title: present(fields.card_title.as_ref()),
        background_color: if coming_soon { None } else { card_color },
        background_image: compute_image_props(fields.card_image.as_ref()),
        text_color: if coming_soon { None } else { Some(text_color) },
        action_cta: present(settings.fields.project_card_action.as_ref())
            .unwrap_or_else(|| DEFAULT_PROJECT_CTA.to_string()),
    }
}

// ============================================================================
// Site chrome
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItemProps {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavProps {
    pub site_name: String,
    pub items: Vec<NavItemProps>,
}

pub fn compute_nav_props(settings: &GlobalSettings, selected: Option<&str>) -> NavProps {
    NavProps {
        site_name: settings.fields.site_name.clone(),
        items: settings
            .fields
            .navigation
            .iter()
            .map(|link| NavItemProps {
                label: link.label.clone(),
                href: link.href.clone(),
                selected: selected.is_some() && link.key.as_deref() == selected,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkProps {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub social: Vec<LinkProps>,
}

/// Footer props from the global settings. Contact details from a contact
/// entry take precedence over the ones in the settings.
pub fn compute_footer_props(settings: &GlobalSettings, contact: Option<&Contact>) -> FooterProps {
    let s = &settings.fields;
    let c = contact.map(|c| &c.fields);
    FooterProps {
        title: present(s.footer_title.as_ref()),
        copy: present(s.footer_copy.as_ref()),
        email: c
            .and_then(|c| present(c.email.as_ref()))
            .or_else(|| present(s.email.as_ref())),
        phone: c
            .and_then(|c| present(c.phone.as_ref()))
            .or_else(|| present(s.phone.as_ref())),
        address: c
            .and_then(|c| present(c.address.as_ref()))
            .or_else(|| present(s.address.as_ref())),
        social: s
            .social_links
            .iter()
            .map(|l| LinkProps {
                label: l.label.clone(),
                href: l.url.clone(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCardProps {
    pub title: String,
    pub action_cta: String,
    pub href: String,
}

/// The "see all projects" card.
pub fn compute_projects_action_card(settings: &GlobalSettings) -> ActionCardProps {
    ActionCardProps {
        title: present(settings.fields.projects_card_title.as_ref())
            .unwrap_or_else(|| settings.fields.site_name.clone()),
        action_cta: present(settings.fields.projects_card_action.as_ref())
            .unwrap_or_else(|| DEFAULT_PROJECTS_CTA.to_string()),
        href: PROJECTS_PATH.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaProps {
    /// Document `<title>`.
    pub title: String,
    /// Social sharing title.
    pub long_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageProps>,
}

pub fn compute_meta_props(
    short_title: &str,
    long_title: &str,
    description: Option<&String>,
    page_image: Option<&Asset>,
    settings: &GlobalSettings,
) -> MetaProps {
    let site_name = settings.fields.site_name.trim();
    let title = match (short_title.trim(), site_name) {
        ("", site) => site.to_string(),
        (short, "") => short.to_string(),
        (short, site) if short == site => short.to_string(),
        (short, site) => format!("{short} | {site}"),
    };
    MetaProps {
        title,
        long_title: long_title.to_string(),
        description: present(description),
        image: compute_meta_image(page_image, settings),
    }
}

// ============================================================================
// Content blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestoProps {
    pub key: String,
    pub short: String,
    /// Markdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

pub fn compute_manifesto_props(item: &Entry<ManifestoItemFields>) -> ManifestoProps {
    ManifestoProps {
        key: item.sys.id.clone(),
        short: item.fields.short_text.clone(),
        long: present(item.fields.long_text.as_ref()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub image: ImageProps,
}

/// Photo grid cells; invalid images are left out.
pub fn compute_photo_props(photos: &[Asset]) -> Vec<PhotoProps> {
    photos
        .iter()
        .filter_map(|asset| {
            compute_image_props(Some(asset)).map(|image| PhotoProps {
                title: present(asset.fields.title.as_ref()),
                image,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleProps {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageProps>,
}

pub fn compute_article_props(article: &Entry<crate::types::ArticleFields>) -> ArticleProps {
    let f = &article.fields;
    ArticleProps {
        title: f.title.clone(),
        publication: present(f.publication.as_ref()),
        href: present(f.url.as_ref()),
        image: compute_image_props(f.image.as_ref()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivacyProps {
    pub title: String,
    /// Markdown.
    pub body: String,
}

pub const DEFAULT_PRIVACY_TITLE: &str = "Privacy policy";

/// Privacy notice of the about page; `None` when the page has no text.
pub fn compute_privacy_props(page: &PeoplePageFields) -> Option<PrivacyProps> {
    Some(PrivacyProps {
        body: present(page.privacy_policy.as_ref())?,
        title: present(page.privacy_title.as_ref())
            .unwrap_or_else(|| DEFAULT_PRIVACY_TITLE.to_string()),
    })
}

// ============================================================================
// Project detail page
// ============================================================================

/// Stacking order (z-index) of the layers of a project page. The page
/// scrolls through cover, hero, slides, contact, then the next-project
/// footer, each layer sliding over the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackOrder {
    pub cover: usize,
    pub hero: usize,
    pub slides: Vec<usize>,
    pub contact: usize,
    pub footer: usize,
}

pub fn compute_stack_order(slide_count: usize) -> StackOrder {
    // Contact slide and project footer sit below every content slide.
    const FOOTER_LAYERS: usize = 2;
    StackOrder {
        cover: slide_count + 4,
        hero: slide_count + 3,
        slides: (0..slide_count)
            .map(|i| slide_count - i + FOOTER_LAYERS)
            .collect(),
        contact: 2,
        footer: 1,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProps {
    pub background: SlideBackground,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHeroProps {
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPageProps {
    pub meta: MetaProps,
    pub hero: ProjectHeroProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub text_color: TextColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<ImageProps>,
    pub slides: Vec<SlideProps>,
    pub stack: StackOrder,
    pub next_project: ProjectCardProps,
    pub next_label: String,
}

/// Props for a project detail page. `project` is the merged project entry
/// (project fields over the shared template).
pub fn compute_project_page_props(
    project: &Project,
    template_name: Option<&str>,
    next_project: &Project,
    settings: &GlobalSettings,
) -> ProjectPageProps {
    let f = &project.fields;
    let hero_title = present(f.hero_title.as_ref());
    let background_color = css_color(f.color.as_ref());
    let text_color = compute_text_color(
        f.text_color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(background_color.as_deref()),
    );
    let stack = compute_stack_order(f.slides.len());
    let slides = f
        .slides
        .iter()
        .zip(&stack.slides)
        .map(|(slide, &index)| SlideProps {
            background: slide.fields.background_color,
            image: compute_image_props(slide.fields.image.as_ref()),
            caption: present(slide.fields.caption.as_ref()),
            index,
        })
        .collect();

    let short_title = match template_name {
        Some(section) if !section.trim().is_empty() => format!("{} | {}", f.client_name, section.trim()),
        _ => f.client_name.clone(),
    };
    let meta = compute_meta_props(
        &short_title,
        hero_title.as_deref().unwrap_or(&f.client_name),
        f.meta_description.as_ref().or(f.hero_copy.as_ref()),
        f.meta_image.as_ref(),
        settings,
    );

    ProjectPageProps {
        meta,
        hero: ProjectHeroProps {
            client_name: f.client_name.clone(),
            year: f.year,
            title: hero_title,
            copy: present(f.hero_copy.as_ref()),
        },
        background_color,
        text_color,
        cover: compute_image_props(f.cover_image.as_ref()),
        slides,
        stack,
        next_project: compute_project_card_props(next_project, settings),
        next_label: present(settings.fields.next_project_label.as_ref())
            .unwrap_or_else(|| DEFAULT_NEXT_PROJECT_LABEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{asset, global_settings, project};
    use crate::types::{AssetFields, SlideFields, Sys};

    // =========================================================================
    // compute_text_color
    // =========================================================================

    #[test]
    fn text_color_named_values() {
        assert_eq!(compute_text_color(Some("light")), TextColor::Light);
        assert_eq!(compute_text_color(Some("White")), TextColor::Light);
        assert_eq!(compute_text_color(Some("DARK")), TextColor::Dark);
        assert_eq!(compute_text_color(Some("black")), TextColor::Dark);
    }

    #[test]
    fn text_color_from_hex_backgrounds() {
        assert_eq!(compute_text_color(Some("#112233")), TextColor::Light);
        assert_eq!(compute_text_color(Some("#000")), TextColor::Light);
        assert_eq!(compute_text_color(Some("#ffffff")), TextColor::Dark);
        assert_eq!(compute_text_color(Some("#f4e04d")), TextColor::Dark);
    }

    #[test]
    fn text_color_defaults_to_dark() {
        assert_eq!(compute_text_color(None), TextColor::Dark);
        assert_eq!(compute_text_color(Some("")), TextColor::Dark);
        assert_eq!(compute_text_color(Some("teal")), TextColor::Dark);
        assert_eq!(compute_text_color(Some("#12345")), TextColor::Dark);
        assert_eq!(compute_text_color(Some("#ggg")), TextColor::Dark);
    }

    // =========================================================================
    // Images
    // =========================================================================

    #[test]
    fn image_props_for_valid_asset() {
        let a = asset("a1", "//images.ctfassets.net/x/a.jpg", Some((800, 600)));
        let props = compute_image_props(Some(&a)).unwrap();
        assert_eq!(props.src, "https://images.ctfassets.net/x/a.jpg");
        assert_eq!(props.width, Some(800));
        assert_eq!(props.height, Some(600));
        assert_eq!(props.alt, "a1");
    }

    #[test]
    fn image_props_omitted_for_invalid_assets() {
        assert_eq!(compute_image_props(None), None);
        let no_file = Asset {
            sys: Sys::default(),
            fields: AssetFields {
                title: Some("draft".into()),
                ..AssetFields::default()
            },
        };
        assert!(!is_valid_image(Some(&no_file)));
        assert_eq!(compute_image_props(Some(&no_file)), None);
        let blank_url = asset("blank", "  ", None);
        assert_eq!(compute_image_props(Some(&blank_url)), None);
    }

    #[test]
    fn meta_image_falls_back_to_site_default() {
        let mut settings = global_settings();
        settings.fields.meta_image = Some(asset("default", "https://cdn/meta.jpg", None));
        let meta = compute_meta_image(None, &settings).unwrap();
        assert_eq!(meta.src, "https://cdn/meta.jpg");

        let page = asset("page", "https://cdn/page.jpg", None);
        let meta = compute_meta_image(Some(&page), &settings).unwrap();
        assert_eq!(meta.src, "https://cdn/page.jpg");
    }

    // =========================================================================
    // compute_project_card_props
    // =========================================================================

    #[test]
    fn coming_soon_suppresses_colors() {
        let mut p = project("cobalt");
        p.fields.coming_soon = Some(true);
        p.fields.card_color = Some("#0047ab".into());
        p.fields.card_text_color = Some("light".into());

        let props = compute_project_card_props(&p, &global_settings());
        assert!(props.coming_soon);
        assert_eq!(props.background_color, None);
        assert_eq!(props.text_color, None);
        assert_eq!(props.href(), None);
    }

    #[test]
    fn card_color_drives_text_color() {
        let mut p = project("atlas");
        p.fields.coming_soon = Some(false);
        p.fields.card_color = Some("#112233".into());

        let props = compute_project_card_props(&p, &global_settings());
        assert_eq!(props.background_color.as_deref(), Some("#112233"));
        assert_eq!(props.text_color, Some(compute_text_color(Some("#112233"))));
        assert_eq!(props.href().as_deref(), Some("/projects/atlas/"));
    }

    #[test]
    fn css_color_accepts_only_hex() {
        assert_eq!(css_color(Some(&" #AbC ".to_string())).as_deref(), Some("#AbC"));
        assert_eq!(css_color(Some(&"#112233".to_string())).as_deref(), Some("#112233"));
        assert_eq!(css_color(Some(&"red; background: url(x)".to_string())), None);
        assert_eq!(css_color(Some(&"#12".to_string())), None);
        assert_eq!(css_color(None), None);
    }

    #[test]
    fn non_color_card_value_is_dropped() {
        let mut p = project("atlas");
        p.fields.card_color = Some("#fff; position: fixed".into());
        let props = compute_project_card_props(&p, &global_settings());
        assert_eq!(props.background_color, None);
        assert_eq!(props.text_color, Some(TextColor::Dark));

        p.fields.color = Some("expression(alert(1))".into());
        let page = compute_project_page_props(&p, None, &project("beacon"), &global_settings());
        assert_eq!(page.background_color, None);
    }

    #[test]
    fn explicit_card_text_color_wins() {
        let mut p = project("beacon");
        p.fields.card_color = Some("#112233".into());
        p.fields.card_text_color = Some("dark".into());
        let props = compute_project_card_props(&p, &global_settings());
        assert_eq!(props.text_color, Some(TextColor::Dark));
    }

    #[test]
    fn invalid_card_image_leaves_no_image_key() {
        let mut p = project("atlas");
        p.fields.card_image = Some(Asset::default());
        let props = compute_project_card_props(&p, &global_settings());
        assert_eq!(props.background_image, None);

        let json = serde_json::to_value(&props).unwrap();
        assert!(json.get("backgroundImage").is_none());
    }

    #[test]
    fn optional_card_fields_normalized() {
        let mut p = project("atlas");
        p.fields.card_title = Some("   ".into());
        p.fields.year = None;
        let props = compute_project_card_props(&p, &global_settings());
        assert_eq!(props.title, None);
        let json = serde_json::to_value(&props).unwrap();
        assert!(json.get("year").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn action_cta_from_settings_or_default() {
        let mut settings = global_settings();
        settings.fields.project_card_action = Some("View case study".into());
        let props = compute_project_card_props(&project("a"), &settings);
        assert_eq!(props.action_cta, "View case study");

        settings.fields.project_card_action = None;
        let props = compute_project_card_props(&project("a"), &settings);
        assert_eq!(props.action_cta, DEFAULT_PROJECT_CTA);
    }

    // =========================================================================
    // Chrome
    // =========================================================================

    #[test]
    fn nav_marks_selected_section() {
        let nav = compute_nav_props(&global_settings(), Some("about"));
        let selected: Vec<_> = nav
            .items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(selected, vec!["About"]);

        let nav = compute_nav_props(&global_settings(), None);
        assert!(nav.items.iter().all(|i| !i.selected));
    }

    #[test]
    fn footer_prefers_contact_entry() {
        let mut settings = global_settings();
        settings.fields.email = Some("settings@example.com".into());
        settings.fields.phone = Some("123".into());
        let contact = Contact {
            sys: Sys::default(),
            fields: crate::types::ContactFields {
                email: Some("contact@example.com".into()),
                phone: None,
                address: None,
            },
        };
        let footer = compute_footer_props(&settings, Some(&contact));
        assert_eq!(footer.email.as_deref(), Some("contact@example.com"));
        assert_eq!(footer.phone.as_deref(), Some("123"));
    }

    #[test]
    fn meta_title_combines_short_title_and_site_name() {
        let settings = global_settings();
        let meta = compute_meta_props("About", "We are a studio", None, None, &settings);
        assert_eq!(meta.title, "About | Test Studio");
        assert_eq!(meta.long_title, "We are a studio");
        let meta = compute_meta_props("", "Home", None, None, &settings);
        assert_eq!(meta.title, "Test Studio");
    }

    #[test]
    fn photo_grid_skips_invalid_images() {
        let photos = vec![
            asset("team", "https://cdn/team.jpg", None),
            Asset::default(),
        ];
        let cells = compute_photo_props(&photos);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].title.as_deref(), Some("team"));
    }

    // =========================================================================
    // Project page
    // =========================================================================

    #[test]
    fn stack_order_layers_cover_over_slides() {
        let order = compute_stack_order(2);
        assert_eq!(order.cover, 6);
        assert_eq!(order.hero, 5);
        assert_eq!(order.slides, vec![4, 3]);
        assert_eq!(order.contact, 2);
        assert_eq!(order.footer, 1);

        let empty = compute_stack_order(0);
        assert_eq!((empty.cover, empty.hero), (4, 3));
        assert!(empty.slides.is_empty());
    }

    #[test]
    fn project_page_props() {
        let mut p = project("atlas");
        p.fields.color = Some("#112233".into());
        p.fields.hero_title = Some("A bank that talks back".into());
        p.fields.slides = vec![
            Entry {
                sys: Sys::default(),
                fields: SlideFields {
                    background_color: SlideBackground::Dark,
                    image: None,
                    caption: Some("Step one".into()),
                },
            },
            Entry {
                sys: Sys::default(),
                fields: SlideFields::default(),
            },
        ];
        let next = project("beacon");

        let props = compute_project_page_props(&p, Some("Work"), &next, &global_settings());
        assert_eq!(props.text_color, TextColor::Light);
        assert_eq!(props.background_color.as_deref(), Some("#112233"));
        assert_eq!(props.meta.title, "atlas client | Work | Test Studio");
        assert_eq!(props.meta.long_title, "A bank that talks back");
        assert_eq!(props.slides.len(), 2);
        assert_eq!(props.slides[0].index, 4);
        assert_eq!(props.slides[0].caption.as_deref(), Some("Step one"));
        assert_eq!(props.next_project.slug, "beacon");
        assert_eq!(props.next_label, DEFAULT_NEXT_PROJECT_LABEL);
    }

    #[test]
    fn privacy_props_need_a_body() {
        let mut page = PeoplePageFields::default();
        assert_eq!(compute_privacy_props(&page), None);

        page.privacy_policy = Some("We keep nothing.".into());
        let props = compute_privacy_props(&page).unwrap();
        assert_eq!(props.title, DEFAULT_PRIVACY_TITLE);

        page.privacy_title = Some("Your data".into());
        assert_eq!(compute_privacy_props(&page).unwrap().title, "Your data");
    }
}
