//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a `config.toml` placed at the root of the source directory.
//!
//! ## Config File Location
//!
//! ```text
//! docs/
//! ├── config.toml              # Site config (optional)
//! ├── 010-getting-started.md
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Documentation"     # Site title (header, <title>, landing page)
//! description = ""            # One-line tagline shown on the landing page
//!
//! [documents]
//! extensions = ["md"]         # File extensions treated as documents
//! exclude = ["README.md"]     # File names skipped (case-insensitive)
//!
//! [[nav]]                     # Navigation links, in order
//! label = "Home"
//! href = "index.html"
//!
//! [landing]
//! enabled = true              # Generate the landing page
//! file_name = "index.html"    # Landing page file name in the output root
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#0b57d0"
//! link_hover = "#063a8c"
//! code_background = "#f4f4f4"
//!
//! [colors.dark]
//! background = "#111111"
//! text = "#e8e8e8"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#8ab4f8"
//! link_hover = "#c2d7fb"
//! code_background = "#1e1e1e"
//!
//! [processing]
//! max_processes = 4           # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key by key; arrays (such as `nav`) replace the default as a whole.
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

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the header and appended to every page title.
    pub title: String,
    /// Tagline shown under the title on the landing page.
    pub description: String,
    /// Which files count as documents.
    pub documents: DocumentsConfig,
    /// Landing page settings.
    pub landing: LandingConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Navigation links rendered in every page header.
    pub nav: Vec<NavLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            description: String::new(),
            documents: DocumentsConfig::default(),
            landing: LandingConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
            nav: vec![NavLink {
                label: "Home".to_string(),
                href: "index.html".to_string(),
            }],
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.documents.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "documents.extensions must not be empty".into(),
            ));
        }
        if self
            .documents
            .extensions
            .iter()
            .any(|e| e.trim().is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(
                "documents.extensions entries must be bare extensions like \"md\"".into(),
            ));
        }
        let file_name = &self.landing.file_name;
        if !file_name.ends_with(".html") || file_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "landing.file_name must be a plain .html file name, got \"{file_name}\""
            )));
        }
        if let Some(link) = self
            .nav
            .iter()
            .find(|l| l.label.trim().is_empty() || l.href.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "nav links need both a label and an href (label \"{}\", href \"{}\")",
                link.label, link.href
            )));
        }
        Ok(())
    }

    /// True when `file_name` matches an entry of `documents.exclude`.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.documents
            .exclude
            .iter()
            .any(|e| e.eq_ignore_ascii_case(file_name))
    }

    /// True when `extension` is one of `documents.extensions`.
    pub fn is_document_extension(&self, extension: &str) -> bool {
        self.documents
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Which files in the source tree are converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentsConfig {
    /// File extensions (without the dot) treated as documents.
    pub extensions: Vec<String>,
    /// File names that are never converted, compared case-insensitively.
    pub exclude: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude: vec!["README.md".to_string()],
        }
    }
}

/// A navigation link in the page header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    /// Relative hrefs are resolved against the output root.
    pub href: String,
}

/// Landing page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    pub enabled: bool,
    /// File name of the landing page in the output root.
    pub file_name: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: "index.html".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel conversion workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (nav links, footer).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Background of `<pre>` blocks and inline `<code>`.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#0b57d0".to_string(),
            link_hover: "#063a8c".to_string(),
            code_background: "#f4f4f4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#8ab4f8".to_string(),
            link_hover: "#c2d7fb".to_string(),
            code_background: "#1e1e1e".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
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
/// - Non-table values in overlay (arrays included) replace base values entirely.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
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

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Pages Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the source directory (next to your
# documents). Unknown keys will cause an error.

# Site title: shown in every page header and appended to page titles.
title = "Documentation"

# One-line tagline shown on the landing page.
description = ""

# ---------------------------------------------------------------------------
# Documents
# ---------------------------------------------------------------------------
[documents]
# File extensions (without the dot) that are converted to pages.
extensions = ["md"]

# File names that are never converted (case-insensitive).
exclude = ["README.md"]

# ---------------------------------------------------------------------------
# Landing page
# ---------------------------------------------------------------------------
[landing]
# Generate a landing page with a features summary and a document list.
enabled = true

# Landing page file name in the output root.
file_name = "index.html"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"
border = "#e0e0e0"
link = "#0b57d0"
link_hover = "#063a8c"
code_background = "#f4f4f4"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
text = "#e8e8e8"
text_muted = "#999999"
border = "#333333"
link = "#8ab4f8"
link_hover = "#c2d7fb"
code_background = "#1e1e1e"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel conversion workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
# Links rendered in every page header, in order. Defining any [[nav]]
# entry replaces the default list.
[[nav]]
label = "Home"
href = "index.html"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
        ("--color-code-bg", &scheme.code_background),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
