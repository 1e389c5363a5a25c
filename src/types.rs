//! Types shared between the scan and generate stages.

use serde::Serialize;

/// A source document discovered by the scanner.
///
/// Paths are relative to the source root (input) and the output root (output)
/// and always use `/` separators, so manifests look the same on every platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Relative source path, e.g. `guides/010-install.md`
    pub source_path: String,
    /// Relative output path, e.g. `guides/010-install.html`
    pub output_path: String,
    /// File stem with the number prefix stripped
    pub slug: String,
    /// Filename-derived title, used when the document has no heading
    pub link_title: String,
    /// Whether the file name carries a number prefix
    pub numbered: bool,
    /// Sort key from the number prefix (`u32::MAX` when unnumbered)
    pub sort_key: u32,
}

impl Document {
    /// Number of directories between the output root and this page.
    pub fn depth(&self) -> usize {
        self.output_path.matches('/').count()
    }
}

/// A document after conversion, with its resolved title.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub document: Document,
    /// First heading of the fragment, or the link title as fallback
    pub title: String,
    /// Whether `title` came from a heading in the document
    pub title_from_heading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(output_path: &str) -> Document {
        Document {
            source_path: output_path.replace(".html", ".md"),
            output_path: output_path.to_string(),
            slug: "x".to_string(),
            link_title: "x".to_string(),
            numbered: false,
            sort_key: u32::MAX,
        }
    }

    #[test]
    fn depth_counts_directories() {
        assert_eq!(doc("intro.html").depth(), 0);
        assert_eq!(doc("guides/intro.html").depth(), 1);
        assert_eq!(doc("a/b/intro.html").depth(), 2);
    }
}
