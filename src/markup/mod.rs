//! Markup-to-HTML conversion.
//!
//! The only entry point most callers need is [`convert`]: it takes the raw
//! text of one document and returns an HTML fragment (no `<head>`, no page
//! shell). It never fails; input that matches no rule comes back as literal
//! text inside a paragraph.
//!
//! ```text
//! document ──► pipeline passes ──► normalize ──► restore code ──► fragment
//! ```
//!
//! - [`rules`] holds the pattern table.
//! - [`heading`] finds the first heading, for page titles.
//! - [`pipeline`] applies the rules in a fixed order.
//! - [`normalize`](normalize()) removes paragraph wrapping that ended up around block
//!   elements.
//!
//! # Supported syntax
//!
//! | Source | Output |
//! |--------|--------|
//! | ```` ```lang ```` … ```` ``` ```` | `<pre><code>…</code></pre>` (body verbatim) |
//! | `# `, `## `, `### ` | `<h1>`, `<h2>`, `<h3>` |
//! | `***x***`, `**x**`, `*x*` | `<strong><em>`, `<strong>`, `<em>` |
//! | `` `x` `` | `<code>` |
//! | `[label](url)` | `<a href="url">label</a>` |
//! | `- x`, `1. x` | `<li>` inside a single `<ul>` |
//! | blank line | paragraph boundary |
//!
//! Nested lists, blockquotes and HTML escaping are not supported.

pub mod heading;
pub mod normalize;
pub mod pipeline;
pub mod rules;

pub use normalize::normalize;
pub use pipeline::{Conversion, Pipeline};

use std::sync::LazyLock;

static STANDARD: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::standard().expect("built-in markup patterns must compile"));

/// Convert one document to an HTML fragment.
pub fn convert(document: &str) -> String {
    STANDARD.convert(document)
}

/// Convert one document and report its first heading outside fenced code.
pub fn convert_with_heading(document: &str) -> Conversion {
    STANDARD.convert_with_heading(document)
}
