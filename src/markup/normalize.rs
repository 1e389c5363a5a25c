//! Fragment cleanup after paragraph wrapping.
//!
//! The paragraph pass wraps every blank-line separated segment, block
//! elements included. This pass undoes the wrapping where it is illegal:
//!
//! - `<p></p>` (or whitespace only) is dropped.
//! - `<p>` whose whole content is one heading, preformatted block, or list
//!   container is replaced by that element.
//!
//! Anything else is left alone. The rules are applied until nothing changes,
//! so running the pass twice gives the same result as running it once.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static EMPTY_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\s*</p>\n?").expect("empty paragraph pattern must compile"));

static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("paragraph pattern must compile"));

/// Elements a paragraph may not wrap.
const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "pre", "ul", "ol"];

/// Apply the cleanup until the fragment stops changing.
///
/// One round can expose new work: dropping an inner `<p></p>` may leave an
/// outer pair empty, or turn it into a single-block wrapper. Every round that
/// changes anything makes the fragment shorter, so the loop terminates.
pub fn normalize(fragment: &str) -> String {
    let mut current = fragment.trim().to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(fragment: &str) -> String {
    let without_empty = EMPTY_PARAGRAPH.replace_all(fragment, "");
    let unwrapped = PARAGRAPH.replace_all(&without_empty, |caps: &Captures| {
        let inner = caps[1].trim();
        if inner.is_empty() {
            String::new()
        } else if is_single_block(inner) {
            inner.to_string()
        } else {
            caps[0].to_string()
        }
    });
    unwrapped.trim().to_string()
}

/// True when `html` is exactly one block element: it opens with a block tag and
/// the first matching close tag is the last thing in it.
fn is_single_block(html: &str) -> bool {
    BLOCK_TAGS.iter().any(|tag| {
        let open = format!("<{tag}>");
        let close = format!("</{tag}>");
        html.starts_with(&open)
            && html.ends_with(&close)
            && html.find(&close) == Some(html.len() - close.len())
    })
}
