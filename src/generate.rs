//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scan manifest, converts every document with
//! [`markup::convert`](crate::markup::convert), wraps the fragments in the page
//! shell and writes the output tree.
//!
//! ## Generated Pages
//!
//! - **Document pages** (`/{path}.html`): one per source document, mirroring
//!   the source layout
//! - **Landing page** (`/index.html` by default): a fixed features summary
//!   plus a list of every generated document
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                 # Landing page
//! ├── 010-introduction.html
//! ├── 020-syntax.html
//! ├── changelog.html
//! └── guides/
//!     └── 010-install.html
//! ```
//!
//! ## Titles
//!
//! A page's title is the text of the first heading in its fragment, with
//! inline tags stripped. Headings quoted inside fenced code do not count.
//! Documents without a heading fall back to the filename-derived link title
//! (`020-syntax.md` → "Syntax").
//!
//! ## Links
//!
//! Nav hrefs and landing page links are written relative to the output root.
//! Pages in subdirectories get a `../` prefix per level so the output tree can
//! be served from any path, or opened straight from disk.
//!
//! ## Parallelism
//!
//! Documents are converted and written in parallel with rayon. Each worker
//! writes to its own file, so the only shared setup is creating the output
//! directory, done once before any worker starts. The first failure fails the
//! whole run.
//!
//! ## HTML Generation
//!
//! The page shell uses [maud](https://maud.lambda.xyz/). Site-controlled
//! strings (titles, nav labels) are escaped; converted fragments are inserted
//! as-is.

use crate::config::{self, NavLink, SiteConfig};
use crate::markup;
use crate::scan::Manifest;
use crate::types::{Document, RenderedPage};
use log::{debug, info};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("More than one page would be written to {0}")]
    OutputConflict(String),
}

/// What the generate stage produced.
#[derive(Debug)]
pub struct GenerateReport {
    /// Rendered documents, in manifest order
    pub pages: Vec<RenderedPage>,
    /// Landing page file name, if one was written
    pub landing: Option<String>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const LANDING_FRAGMENT: &str = include_str!("../static/landing.html");

pub fn generate(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    check_output_conflicts(manifest)?;

    let config = &manifest.config;
    let css = site_css(config);

    fs::create_dir_all(output_dir)?;

    let pages = manifest
        .documents
        .par_iter()
        .map(|doc| {
            let (page, fragment) = convert_document(doc, source_root)?;
            let html = render_page(&page, &fragment, config, &css);
            write_page(&output_dir.join(&doc.output_path), html)?;
            debug!("Generated {}", doc.output_path);
            Ok(page)
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let landing = if config.landing.enabled {
        let html = render_landing(&pages, config, &css);
        write_page(&output_dir.join(&config.landing.file_name), html)?;
        debug!("Generated {}", config.landing.file_name);
        Some(config.landing.file_name.clone())
    } else {
        None
    };

    info!(
        "Generated {} pages in {}",
        pages.len() + usize::from(landing.is_some()),
        output_dir.display()
    );
    Ok(GenerateReport { pages, landing })
}

/// Convert every document in memory without writing anything.
///
/// Used by the `check` command: it surfaces unreadable files and output
/// conflicts exactly as a build would.
pub fn check(manifest: &Manifest, source_root: &Path) -> Result<Vec<RenderedPage>, GenerateError> {
    check_output_conflicts(manifest)?;
    manifest
        .documents
        .par_iter()
        .map(|doc| convert_document(doc, source_root).map(|(page, _)| page))
        .collect()
}

/// Read and convert one document, resolving its title.
fn convert_document(
    doc: &Document,
    source_root: &Path,
) -> Result<(RenderedPage, String), GenerateError> {
    let path = source_root.join(&doc.source_path);
    let text = fs::read_to_string(&path).map_err(|source| GenerateError::Read {
        path: path.clone(),
        source,
    })?;
    let converted = markup::convert_with_heading(&text);
    let page = RenderedPage {
        document: doc.clone(),
        title_from_heading: converted.heading.is_some(),
        title: converted
            .heading
            .unwrap_or_else(|| doc.link_title.clone()),
    };
    Ok((page, converted.fragment))
}

fn write_page(path: &Path, html: Markup) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, html.into_string()).map_err(write_err)
}

/// Fail before writing anything if two pages share an output path.
fn check_output_conflicts(manifest: &Manifest) -> Result<(), GenerateError> {
    let mut seen = HashSet::new();
    if manifest.config.landing.enabled {
        seen.insert(manifest.config.landing.file_name.as_str());
    }
    for doc in &manifest.documents {
        if !seen.insert(doc.output_path.as_str()) {
            return Err(GenerateError::OutputConflict(doc.output_path.clone()));
        }
    }
    Ok(())
}

/// Color variables from config followed by the static stylesheet.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Prefix a root-relative href with `../` once per directory level.
///
/// Absolute paths, fragments and anything with a scheme are left alone.
fn resolve_href(href: &str, depth: usize) -> String {
    if depth == 0 || href.starts_with(['/', '#']) || href.contains(':') {
        href.to_string()
    } else {
        format!("{}{}", "../".repeat(depth), href)
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header: site title and nav links
fn site_header(config: &SiteConfig, depth: usize) -> Markup {
    html! {
        header.site-header {
            @if config.landing.enabled {
                a.site-title href=(resolve_href(&config.landing.file_name, depth)) { (config.title) }
            } @else {
                span.site-title { (config.title) }
            }
            nav.site-nav {
                (render_nav(&config.nav, depth))
            }
        }
    }
}

/// Renders the navigation links
pub fn render_nav(links: &[NavLink], depth: usize) -> Markup {
    html! {
        ul {
            @for link in links {
                li {
                    a href=(resolve_href(&link.href, depth)) { (link.label) }
                }
            }
        }
    }
}

/// `"{page} · {site}"`, or just the site title when they are the same.
fn page_title(title: &str, config: &SiteConfig) -> String {
    if title == config.title {
        title.to_string()
    } else {
        format!("{} \u{00b7} {}", title, config.title)
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a document page around its converted fragment
fn render_page(page: &RenderedPage, fragment: &str, config: &SiteConfig, css: &str) -> Markup {
    let depth = page.document.depth();
    let content = html! {
        (site_header(config, depth))
        main.document-page {
            article.content {
                (PreEscaped(fragment))
            }
        }
    };
    base_document(&page_title(&page.title, config), css, None, content)
}

/// Renders the landing page: features summary and document list
fn render_landing(pages: &[RenderedPage], config: &SiteConfig, css: &str) -> Markup {
    let content = html! {
        (site_header(config, 0))
        main.landing-page {
            header.landing-header {
                h1 { (config.title) }
                @if !config.description.is_empty() {
                    p.tagline { (config.description) }
                }
            }
            section.features.content {
                (PreEscaped(LANDING_FRAGMENT))
            }
            @if !pages.is_empty() {
                section.documents {
                    h2 { "Documents" }
                    ul.document-list {
                        @for page in pages {
                            li {
                                a href=(page.document.output_path) { (page.title) }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(&config.title, css, Some("landing"), content)
}

// ============================================================================
// Tests
// ============================================================================
