//! Source directory scanning.
//!
//! Stage 1 of the build. Walks the source directory and lists every document
//! to convert, producing a [`Manifest`] the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                            # Source root
//! ├── config.toml                  # Site configuration (optional)
//! ├── README.md                    # Excluded by default
//! ├── 010-introduction.md          # → 010-introduction.html
//! ├── 020-usage.md                 # → 020-usage.html
//! ├── changelog.md                 # → changelog.html (listed last)
//! ├── .drafts/                     # Hidden: skipped entirely
//! └── guides/
//!     └── 010-install.md           # → guides/010-install.html
//! ```
//!
//! ## Rules
//!
//! - Only files whose extension is in `documents.extensions` are documents.
//! - File names in `documents.exclude` are skipped, at any depth.
//! - Hidden files and directories (leading `.`) are skipped.
//! - The output path mirrors the source path with an `.html` extension.
//! - Documents are ordered by number prefix, then by relative path.

use crate::config::SiteConfig;
use crate::naming::parse_entry_name;
use crate::types::Document;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Manifest output from the scan stage
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub documents: Vec<Document>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path, config: &SiteConfig) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_document(entry.path(), config) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if config.is_excluded(&file_name) {
            debug!("Skipping excluded file {}", entry.path().display());
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path());
        documents.push(build_document(relative));
    }

    documents.sort_by(|a, b| {
        (a.sort_key, &a.source_path).cmp(&(b.sort_key, &b.source_path))
    });
    debug!("Found {} documents in {}", documents.len(), root.display());

    Ok(Manifest {
        documents,
        config: config.clone(),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_document(path: &Path, config: &SiteConfig) -> bool {
    path.extension()
        .map(|e| config.is_document_extension(&e.to_string_lossy()))
        .unwrap_or(false)
}

/// Build a [`Document`] from a path relative to the source root.
fn build_document(relative: &Path) -> Document {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_entry_name(&stem);
    let link_title = if parsed.display_title.is_empty() {
        stem.clone()
    } else {
        parsed.display_title
    };

    Document {
        source_path: to_slash(relative),
        output_path: to_slash(&relative.with_extension("html")),
        slug: parsed.name,
        link_title,
        numbered: parsed.number.is_some(),
        sort_key: parsed.number.unwrap_or(u32::MAX),
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_fixture_finds_documents() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(
            source_paths(&manifest),
            vec![
                "010-introduction.md",
                "guides/010-install.md",
                "020-syntax.md",
                "changelog.md",
            ]
        );
    }

    #[test]
    fn readme_is_excluded() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(
            manifest
                .documents
                .iter()
                .all(|d| !d.source_path.ends_with("README.md"))
        );
    }

    #[test]
    fn hidden_directories_are_skipped() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(
            manifest
                .documents
                .iter()
                .all(|d| !d.source_path.contains(".drafts"))
        );
    }

    #[test]
    fn output_path_mirrors_source() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let install = find_document(&manifest, "guides/010-install.md");
        assert_eq!(install.output_path, "guides/010-install.html");
        assert_eq!(install.slug, "install");
        assert_eq!(install.link_title, "Install");
        assert!(install.numbered);
        assert_eq!(install.sort_key, 10);
    }

    #[test]
    fn unnumbered_documents_sort_last() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let last = manifest.documents.last().unwrap();
        assert_eq!(last.source_path, "changelog.md");
        assert!(!last.numbered);
        assert_eq!(last.link_title, "Changelog");
    }

    #[test]
    fn non_document_extensions_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "text").unwrap();
        fs::write(tmp.path().join("page.md"), "# Page").unwrap();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(source_paths(&manifest), vec!["page.md"]);
    }

    #[test]
    fn configured_extensions_are_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.TXT"), "text").unwrap();
        fs::write(tmp.path().join("page.md"), "# Page").unwrap();
        let mut config = SiteConfig::default();
        config.documents.extensions = vec!["txt".to_string()];
        let manifest = scan(tmp.path(), &config).unwrap();
        assert_eq!(source_paths(&manifest), vec!["notes.TXT"]);
        assert_eq!(manifest.documents[0].output_path, "notes.html");
    }

    #[test]
    fn configured_exclusions_are_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("draft.md"), "wip").unwrap();
        fs::write(tmp.path().join("page.md"), "# Page").unwrap();
        let mut config = SiteConfig::default();
        config.documents.exclude.push("draft.md".to_string());
        let manifest = scan(tmp.path(), &config).unwrap();
        assert_eq!(source_paths(&manifest), vec!["page.md"]);
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &SiteConfig::default());
        assert!(matches!(result, Err(ScanError::SourceNotFound(_))));
    }

    #[test]
    fn empty_source_has_no_documents() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(manifest.documents.is_empty());
    }

    #[test]
    fn manifest_serializes_to_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            json["documents"][0]["output_path"],
            "010-introduction.html"
        );
        assert_eq!(json["config"]["title"], "Documentation");
    }
}
