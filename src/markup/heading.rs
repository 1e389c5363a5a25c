//! First-heading lookup, used for page titles.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h[1-6]>(.*?)</h[1-6]>").expect("heading pattern must compile")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

/// Text of the first heading in `fragment`, inline tags stripped.
///
/// `None` when there is no heading or its text is empty.
pub fn first_heading(fragment: &str) -> Option<String> {
    let caps = HEADING.captures(fragment)?;
    let text = TAG.replace_all(&caps[1], "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
