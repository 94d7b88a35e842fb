//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; the user's file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Studio"            # Fallback site name when the CMS has none
//! base_url = ""              # Absolute URL prefix for canonical/meta tags
//! locale = "en-US"           # Locale requested from the CMS
//! # assets_dir = "public"    # Directory copied verbatim into the output
//!
//! [source]
//! kind = "contentful"        # "contentful" or "local"
//! path = "content.json"      # Export file read when kind = "local"
//!
//! [contentful]
//! space_id = ""
//! environment = "master"
//! host = "cdn.contentful.com"
//! access_token_env = "CONTENTFUL_ACCESS_TOKEN"
//! timeout_secs = 30
//!
//! [build]
//! # max_concurrent_routes = 8  # Routes assembled in parallel
//!
//! [colors]
//! background = "#ffffff"
//! text = "#111111"
//! text_light = "#ffffff"     # Text on dark project colours
//! text_dark = "#111111"      # Text on light project colours
//! muted = "#6b6b6b"
//! coming_soon = "#ececec"    # Card background for coming-soon projects
//! ```
//!
//! The Contentful access token is never read from this file. It comes from
//! the environment variable named by `contentful.access_token_env`, which may
//! be set in a `.env` file next to the config.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default number of routes assembled concurrently.
pub const DEFAULT_CONCURRENT_ROUTES: usize = 8;

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub source: SourceConfig,
    pub contentful: ContentfulConfig,
    pub build: BuildConfig,
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are usable for a build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source.kind {
            SourceKind::Contentful => {
                if self.contentful.space_id.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "contentful.space_id is required when source.kind = \"contentful\"".into(),
                    ));
                }
                if self.contentful.access_token_env.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "contentful.access_token_env must name an environment variable".into(),
                    ));
                }
            }
            SourceKind::Local => {
                if self.source.path.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "source.path is required when source.kind = \"local\"".into(),
                    ));
                }
            }
        }
        if self.build.max_concurrent_routes == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_concurrent_routes must be at least 1".into(),
            ));
        }
        if self.contentful.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "contentful.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Used when global settings carry no site name.
    pub name: String,
    /// Absolute URL prefix, without trailing slash. Empty for relative URLs.
    pub base_url: String,
    pub locale: String,
    /// Static files copied as-is into the output root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Studio".to_string(),
            base_url: String::new(),
            locale: "en-US".to_string(),
            assets_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Contentful,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Path of the JSON export, relative to the working directory.
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Contentful,
            path: "content.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment: String,
    /// Delivery API host. Use `preview.contentful.com` for drafts.
    pub host: String,
    /// Name of the environment variable holding the access token.
    pub access_token_env: String,
    pub timeout_secs: u64,
}

impl Default for ContentfulConfig {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            environment: "master".to_string(),
            host: "cdn.contentful.com".to_string(),
            access_token_env: "CONTENTFUL_ACCESS_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of routes assembled at once. When absent, defaults to
    /// [`DEFAULT_CONCURRENT_ROUTES`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_routes: Option<usize>,
}

/// Resolve the effective route concurrency from config.
pub fn effective_concurrency(config: &BuildConfig) -> usize {
    config
        .max_concurrent_routes
        .unwrap_or(DEFAULT_CONCURRENT_ROUTES)
        .max(1)
}

/// Site palette. Project colours come from the CMS; these cover everything
/// else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Text colour used on dark backgrounds.
    pub text_light: String,
    /// Text colour used on light backgrounds.
    pub text_dark: String,
    pub muted: String,
    /// Card background for coming-soon projects.
    pub coming_soon: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_light: "#ffffff".to_string(),
            text_dark: "#111111".to_string(),
            muted: "#6b6b6b".to_string(),
            coming_soon: "#ececec".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` over the stock defaults.
///
/// A missing file is not an error: the stock defaults are used as-is and
/// validated like any other config.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Studio Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Used when the CMS global settings carry no site name.
name = "Studio"

# Absolute URL prefix (no trailing slash) for meta tags. Empty = relative.
base_url = ""

# Locale requested from the CMS.
locale = "en-US"

# Directory copied verbatim into the output root (favicons, fonts, ...).
# assets_dir = "public"

# ---------------------------------------------------------------------------
# Content source
# ---------------------------------------------------------------------------
[source]
# "contentful" reads the Delivery API, "local" reads a JSON export.
kind = "contentful"

# Export file used when kind = "local".
path = "content.json"

# ---------------------------------------------------------------------------
# Contentful
# ---------------------------------------------------------------------------
[contentful]
space_id = ""
environment = "master"

# Use "preview.contentful.com" (with a preview token) to build drafts.
host = "cdn.contentful.com"

# The token itself is read from this environment variable (or .env).
access_token_env = "CONTENTFUL_ACCESS_TOKEN"

# Per-request timeout in seconds.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Routes assembled in parallel. Omit for the default (8).
# max_concurrent_routes = 8

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#ffffff"
text = "#111111"
text_light = "#ffffff"    # Text on dark project colours
text_dark = "#111111"     # Text on light project colours
muted = "#6b6b6b"
coming_soon = "#ececec"   # Card background for coming-soon projects
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-light: {text_light};
    --color-text-dark: {text_dark};
    --color-muted: {muted};
    --color-coming-soon: {coming_soon};
}}"#,
        background = colors.background,
        text = colors.text,
        text_light = colors.text_light,
        text_dark = colors.text_dark,
        muted = colors.muted,
        coming_soon = colors.coming_soon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn local_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.source.kind = SourceKind::Local;
        config
    }

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.locale, "en-US");
        assert_eq!(config.source.kind, SourceKind::Contentful);
        assert_eq!(config.contentful.environment, "master");
        assert_eq!(config.contentful.access_token_env, "CONTENTFUL_ACCESS_TOKEN");
        assert_eq!(config.colors.text_light, "#ffffff");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[contentful]
space_id = "abc123"

[colors]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.contentful.space_id, "abc123");
        assert_eq!(config.colors.background, "#fafafa");
        // Defaults preserved
        assert_eq!(config.contentful.host, "cdn.contentful.com");
        assert_eq!(config.colors.text, "#111111");
    }

    #[test]
    fn parse_local_source() {
        let toml = r#"
[source]
kind = "local"
path = "fixtures/content.json"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.source.kind, SourceKind::Local);
        assert_eq!(config.source.path, "fixtures/content.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.background = "#f0f0f0".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-text-light: #ffffff"));
        assert!(css.contains("--color-coming-soon:"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_missing_file_uses_defaults_and_validates() {
        let tmp = TempDir::new().unwrap();
        // Stock defaults point at Contentful without a space id.
        let result = load_config(&tmp.path().join("config.toml"));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[contentful]
space_id = "space"
environment = "staging"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.contentful.space_id, "space");
        assert_eq!(config.contentful.environment, "staging");
        assert_eq!(config.contentful.timeout_secs, 30);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[contentful]
spaceid = "x"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_source_kind_rejected() {
        let toml_str = r#"
[source]
kind = "wordpress"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_requires_space_id_for_contentful() {
        let mut config = SiteConfig::default();
        assert!(config.validate().is_err());
        config.contentful.space_id = "space".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_requires_path_for_local() {
        let mut config = local_config();
        assert!(config.validate().is_ok());
        config.source.path = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source.path"));
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = local_config();
        config.build.max_concurrent_routes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_concurrency_defaults() {
        assert_eq!(
            effective_concurrency(&BuildConfig::default()),
            DEFAULT_CONCURRENT_ROUTES
        );
        let config = BuildConfig {
            max_concurrent_routes: Some(2),
        };
        assert_eq!(effective_concurrency(&config), 2);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[contentful]
environment = "master"
timeout_secs = 30
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[contentful]
timeout_secs = 5
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let contentful = merged.get("contentful").unwrap();
        assert_eq!(contentful.get("timeout_secs").unwrap().as_integer(), Some(5));
        assert_eq!(
            contentful.get("environment").unwrap().as_str(),
            Some("master")
        );
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"a = 1"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 2"#).unwrap();
        assert_eq!(
            merge_toml(base, overlay).get("a").unwrap().as_integer(),
            Some(2)
        );
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[source]
kind = "local"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.source.kind, SourceKind::Local);
        assert_eq!(config.source.path, "content.json");
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.site.name, "Studio");
        assert_eq!(config.contentful.timeout_secs, 30);
        assert_eq!(config.colors.coming_soon, "#ececec");
        assert_eq!(config.build.max_concurrent_routes, None);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["site", "source", "contentful", "build", "colors"] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }
}
