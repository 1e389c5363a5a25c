//! Shared test utilities for the simple-pages test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
//!
//! let install = find_document(&manifest, "guides/010-install.md");
//! assert_eq!(install.slug, "install");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{Document, RenderedPage};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a document by relative source path. Panics if not found.
pub fn find_document<'a>(manifest: &'a Manifest, source_path: &str) -> &'a Document {
    manifest
        .documents
        .iter()
        .find(|d| d.source_path == source_path)
        .unwrap_or_else(|| {
            panic!(
                "document '{source_path}' not found. Available: {:?}",
                source_paths(manifest)
            )
        })
}

/// Find a rendered page by relative source path. Panics if not found.
pub fn find_page<'a>(pages: &'a [RenderedPage], source_path: &str) -> &'a RenderedPage {
    pages
        .iter()
        .find(|p| p.document.source_path == source_path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = pages
                .iter()
                .map(|p| p.document.source_path.as_str())
                .collect();
            panic!("page '{source_path}' not found. Available: {paths:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All source paths in manifest order.
pub fn source_paths(manifest: &Manifest) -> Vec<&str> {
    manifest
        .documents
        .iter()
        .map(|d| d.source_path.as_str())
        .collect()
}
