//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` file at the
//! content root. User values are layered over stock defaults, so the file
//! only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Estudio de Casos"
//!
//! [documents]
//! placeholder_url = "#"      # URL for document rows with neither file nor link
//!
//! [documents.icons]
//! pdf = "picture_as_pdf"
//! excel = "grid_on"
//! word = "description"
//! powerpoint = "slideshow"
//! weblink = "link"
//!
//! [carousel]
//! window = 1                 # Cards visible at once in the case carousel
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Cannot serialize default config: {0}")]
    Defaults(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Title of the site root node.
    pub site_title: String,
    /// Document list rendering.
    pub documents: DocumentsConfig,
    /// Case carousel behaviour.
    pub carousel: CarouselConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Estudio de Casos".to_string(),
            documents: DocumentsConfig::default(),
            carousel: CarouselConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        if self.documents.placeholder_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "documents.placeholder_url must not be empty".into(),
            ));
        }
        if self.carousel.window == 0 {
            return Err(ConfigError::Validation(
                "carousel.window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Document list settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentsConfig {
    /// URL used when a row has neither an uploaded file nor an external link.
    pub placeholder_url: String,
    /// Icon name per document kind.
    pub icons: IconConfig,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            placeholder_url: "#".to_string(),
            icons: IconConfig::default(),
        }
    }
}

/// Icon names handed to the renderer, one per known document kind.
///
/// An empty string disables the icon for that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    pub pdf: String,
    pub excel: String,
    pub word: String,
    pub powerpoint: String,
    pub weblink: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            pdf: "picture_as_pdf".to_string(),
            excel: "grid_on".to_string(),
            word: "description".to_string(),
            powerpoint: "slideshow".to_string(),
            weblink: "link".to_string(),
        }
    }
}

impl IconConfig {
    /// Icon for a document kind. Unknown kinds have none.
    pub fn icon_for(&self, kind: &DocumentKind) -> Option<&str> {
        let name = match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Excel => &self.excel,
            DocumentKind::Word => &self.word,
            DocumentKind::PowerPoint => &self.powerpoint,
            DocumentKind::WebLink => &self.weblink,
            DocumentKind::Other(_) => return None,
        };
        Some(name.as_str()).filter(|n| !n.is_empty())
    }
}

/// Case carousel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Number of cards visible at once. The carousel stops when the last
    /// card is in view.
    pub window: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { window: 1 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// File name looked up at the content root.
pub const CONFIG_FILE: &str = "config.toml";

/// [`SiteConfig::default`] as a TOML table, the layer `config.toml` sits on.
pub fn defaults_table() -> Result<toml::Table, ConfigError> {
    match toml::Value::try_from(SiteConfig::default())? {
        toml::Value::Table(table) => Ok(table),
        other => Err(ConfigError::Validation(format!(
            "default config serialized to a {}, not a table",
            other.type_str()
        ))),
    }
}

/// Lay `overrides` over `defaults`. Nested tables merge per key, anything
/// else in `overrides` wins outright.
pub fn overlay(mut defaults: toml::Table, overrides: toml::Table) -> toml::Table {
    for (key, value) in overrides {
        let merged = match (defaults.remove(&key), value) {
            (Some(toml::Value::Table(base)), toml::Value::Table(top)) => {
                toml::Value::Table(overlay(base, top))
            }
            (_, value) => value,
        };
        defaults.insert(key, merged);
    }
    defaults
}

/// The author's `config.toml` under `root`, if there is one.
pub fn read_overrides(root: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    debug!(path = %path.display(), "reading site config");
    let content = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Defaults plus optional overrides, checked with [`SiteConfig::validate`].
pub fn from_overrides(overrides: Option<toml::Table>) -> Result<SiteConfig, ConfigError> {
    let table = match overrides {
        Some(top) => overlay(defaults_table()?, top),
        None => defaults_table()?,
    };
    let config: SiteConfig = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Site config for the content directory at `root`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    from_overrides(read_overrides(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Estudio de Casos Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Title of the site root (the page listing every case).
site_title = "Estudio de Casos"

# ---------------------------------------------------------------------------
# Case documents
# ---------------------------------------------------------------------------
[documents]
# URL for a document row that has neither an uploaded file nor a link yet.
placeholder_url = "#"

# Icon shown next to each document, by kind. Empty string = no icon.
# Kinds not listed here are shown without an icon.
[documents.icons]
pdf = "picture_as_pdf"
excel = "grid_on"
word = "description"
powerpoint = "slideshow"
weblink = "link"

# ---------------------------------------------------------------------------
# Case carousel
# ---------------------------------------------------------------------------
[carousel]
# Cards visible at once. Next/previous stop once the last card is in view.
window = 1
"##
}
