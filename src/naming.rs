//! Filename parsing for the `NNN-name` convention.
//!
//! Document file stems may carry a numeric prefix that fixes their position
//! on the landing page:
//!
//! - `010-getting-started.md` → position 10, fallback title "Getting Started"
//! - `020_api_reference.md` → position 20, fallback title "Api Reference"
//! - `changelog.md` → unnumbered, listed after every numbered document
//!
//! The display title is only a fallback: a page whose converted fragment
//! contains a heading takes its title from that heading instead.

/// Result of parsing a file stem like `010-getting-started`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-getting-started`).
    pub number: Option<u32>,
    /// The stem without its prefix, separators preserved. Used as the slug.
    pub name: String,
    /// `name` with `-` and `_` turned into spaces, each word capitalized.
    pub display_title: String,
}

/// Parse a file stem following the `NNN-name` convention.
///
/// The separator after the number may be `-` or `_`. A stem that is only a
/// number keeps it as its name, so `404.md` stays addressable as `404`.
pub fn parse_entry_name(stem: &str) -> ParsedName {
    let split = stem
        .find(['-', '_'])
        .and_then(|pos| Some((stem[..pos].parse::<u32>().ok()?, &stem[pos + 1..])));

    match split {
        Some((number, rest)) if !rest.is_empty() => ParsedName {
            number: Some(number),
            name: rest.to_string(),
            display_title: display_title(rest),
        },
        _ => ParsedName {
            number: None,
            name: stem.to_string(),
            display_title: display_title(stem),
        },
    }
}

fn display_title(name: &str) -> String {
    title_case(name.replace(['-', '_'], " ").trim())
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        word_start = c.is_whitespace();
    }
    out
}
