//! CLI output formatting for the scan, check and build commands.
//!
//! # Information-First Display
//!
//! Every document is shown by its positional index and title. The source
//! file appears as secondary context on an indented `Source:` line, so the
//! output reads as a table of contents while still pointing back at files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Documents
//! 001 Introduction
//!     Source: 010-introduction.md
//! 002 Install
//!     Source: guides/010-install.md
//! 003 Changelog (unnumbered)
//!     Source: changelog.md
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Introduction → 010-introduction.html
//! 002 Installing → guides/010-install.html
//! 003 Changelog → changelog.html
//!     Title: from file name
//! Generated 3 pages and landing page
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::scan::Manifest;
use crate::types::RenderedPage;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Title`, the header line every document gets.
fn entity_header(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index), title)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Context line for pages whose title fell back to the file name.
fn title_source_line(page: &RenderedPage) -> Option<String> {
    (!page.title_from_heading).then(|| format!("{}Title: from file name", indent(1)))
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scan inventory: every document in build order.
///
/// `has_config_file` adds the `Config` section; the caller knows whether
/// `config.toml` was present.
pub fn format_scan_output(manifest: &Manifest, has_config_file: bool) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];

    if manifest.documents.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    for (i, doc) in manifest.documents.iter().enumerate() {
        let mut header = entity_header(i + 1, &doc.link_title);
        if !doc.numbered {
            header.push_str(" (unnumbered)");
        }
        lines.push(header);
        lines.push(format!("{}Source: {}", indent(1), doc.source_path));
    }

    if has_config_file {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.push(format!("{}config.toml", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, has_config_file: bool) {
    for line in format_scan_output(manifest, has_config_file) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the result of converting every document in memory.
pub fn format_check_output(pages: &[RenderedPage]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(entity_header(i + 1, &page.title));
        lines.push(format!("{}Source: {}", indent(1), page.document.source_path));
        lines.extend(title_source_line(page));
    }
    lines.push(format!("Checked {}", plural(pages.len(), "document")));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(pages: &[RenderedPage]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format generate results: each page with its output path, then a summary.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(landing) = &report.landing {
        lines.push(format!("Home \u{2192} {}", landing));
    }

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} \u{2192} {}",
            entity_header(i + 1, &page.title),
            page.document.output_path
        ));
        lines.extend(title_source_line(page));
    }

    let summary = plural(report.pages.len(), "page");
    lines.push(match report.landing {
        Some(_) => format!("Generated {} and landing page", summary),
        None => format!("Generated {}", summary),
    });

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
