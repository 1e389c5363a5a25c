//! The ordered pass pipeline.
//!
//! A [`Pipeline`] is a fixed list of named [`Pass`]es. Each pass takes the
//! whole current fragment and returns the next one; passes never look ahead
//! at what a later pass will do. The standard order is:
//!
//! | # | Pass | Operates on |
//! |---|------|-------------|
//! | 0 | `line_endings` | raw text |
//! | 1 | `fenced_code` | raw text; bodies are set aside until the end |
//! | 2 | `headings` | `#`-prefixed lines |
//! | 3 | `emphasis` | inline text, `***` then `**` then `*` |
//! | 4 | `inline_code` | inline text |
//! | 5 | `links` | inline text |
//! | 6 | `list_items` | `-` / `N.` prefixed lines |
//! | 7 | `list_grouping` | runs of `<li>` lines |
//! | 8 | `merge_lists` | adjacent `<ul>` containers |
//! | 9 | `paragraphs` | blank-line separated segments |
//!
//! After the last pass the fragment goes through
//! [`normalize`](super::normalize) and only then are the fenced code bodies put
//! back, so no rewrite (normalization included) ever touches them. The first
//! heading is read before that restore, so markup quoted inside a fence is
//! never mistaken for the document's title.
//!
//! Placeholders are delimited by U+E000 and U+E001. Any of those characters
//! already in the document are set aside the same way before fences are
//! matched, so document text can never be read as a placeholder.
//!
//! Emphasis runs before inline code, so a code span containing `*` pairs can
//! be rewritten before the code pass sees it. That order is kept on purpose;
//! see `DESIGN.md`.

use super::heading::first_heading;
use super::normalize::normalize;
use super::rules::{self, PatternRule};
use log::trace;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{E000}([0-9]+)\u{E001}").expect("placeholder pattern must compile")
});

static DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{E000}\u{E001}]").expect("delimiter pattern must compile")
});

/// Fenced code bodies removed from the fragment while the passes run.
#[derive(Debug, Default)]
struct FencedBodies {
    bodies: Vec<String>,
}

impl FencedBodies {
    /// Store `body` and return the token that stands in for it.
    fn set_aside(&mut self, body: &str) -> String {
        let index = self.bodies.len();
        self.bodies.push(body.to_string());
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    /// Replace every placeholder with its body. Restored text is not scanned
    /// again.
    fn restore(&self, fragment: &str) -> String {
        if self.bodies.is_empty() {
            return fragment.to_string();
        }
        PLACEHOLDER
            .replace_all(fragment, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.bodies.get(i))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned()
    }
}

/// A compiled [`PatternRule`].
#[derive(Debug)]
struct Rewrite {
    rule: &'static PatternRule,
    regex: Regex,
}

impl Rewrite {
    fn compile(rule: &'static PatternRule) -> Result<Self, regex::Error> {
        Ok(Self {
            rule,
            regex: rule.compile()?,
        })
    }

    fn apply(&self, fragment: &str) -> String {
        self.regex
            .replace_all(fragment, self.rule.replacement)
            .into_owned()
    }
}

#[derive(Debug)]
enum Step {
    LineEndings,
    FencedCode(Rewrite),
    Rewrite(Vec<Rewrite>),
    Paragraphs(Rewrite),
}

/// One named step of the pipeline.
#[derive(Debug)]
pub struct Pass {
    name: &'static str,
    step: Step,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn rewrite(name: &'static str, rules: &'static [PatternRule]) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            step: Step::Rewrite(
                rules
                    .iter()
                    .map(Rewrite::compile)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn apply(&self, fragment: String, fenced: &mut FencedBodies) -> String {
        match &self.step {
            Step::LineEndings => fragment.replace("\r\n", "\n").replace('\r', "\n"),
            Step::FencedCode(fence) => {
                let shielded = DELIMITER
                    .replace_all(&fragment, |caps: &Captures| fenced.set_aside(&caps[0]))
                    .into_owned();
                fence
                    .regex
                    .replace_all(&shielded, |caps: &Captures| {
                        // Delimiters inside the body go back in literally; the
                        // body as a whole is restored in one step.
                        let body = fenced.restore(&caps["body"]);
                        let token = fenced.set_aside(&body);
                        fence.rule.replacement.replace("${body}", &token)
                    })
                    .into_owned()
            }
            Step::Rewrite(rewrites) => rewrites
                .iter()
                .fold(fragment, |text, rewrite| rewrite.apply(&text)),
            Step::Paragraphs(split) => {
                format!("<p>{}</p>", split.apply(trim_blank_lines(&fragment)))
            }
        }
    }
}

/// Drop blank lines at both ends, keeping the indentation of the first line.
fn trim_blank_lines(text: &str) -> &str {
    let text = text.trim_end();
    let indent_start = text.len() - text.trim_start().len();
    match text[..indent_start].rfind('\n') {
        Some(newline) => &text[newline + 1..],
        None => text,
    }
}

/// A converted document.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The HTML fragment
    pub fragment: String,
    /// Text of the first heading outside fenced code, tags stripped
    pub heading: Option<String>,
}

/// The ordered list of passes that turns a document into a fragment.
#[derive(Debug)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    /// Build the standard pipeline from the pattern table.
    pub fn standard() -> Result<Self, regex::Error> {
        let passes = vec![
            Pass {
                name: "line_endings",
                step: Step::LineEndings,
            },
            Pass {
                name: "fenced_code",
                step: Step::FencedCode(Rewrite::compile(&rules::FENCED_CODE)?),
            },
            Pass::rewrite("headings", &rules::HEADINGS)?,
            Pass::rewrite("emphasis", &rules::EMPHASIS)?,
            Pass::rewrite("inline_code", std::slice::from_ref(&rules::INLINE_CODE))?,
            Pass::rewrite("links", std::slice::from_ref(&rules::LINK))?,
            Pass::rewrite("list_items", std::slice::from_ref(&rules::LIST_ITEM))?,
            Pass::rewrite("list_grouping", std::slice::from_ref(&rules::LIST_GROUP))?,
            Pass::rewrite("merge_lists", std::slice::from_ref(&rules::LIST_MERGE))?,
            Pass {
                name: "paragraphs",
                step: Step::Paragraphs(Rewrite::compile(&rules::PARAGRAPH_BREAK)?),
            },
        ];
        Ok(Self { passes })
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Run every pass, normalize, then restore fenced code bodies.
    pub fn convert(&self, document: &str) -> String {
        self.convert_with_heading(document).fragment
    }

    /// Like [`convert`](Self::convert), also reporting the first heading.
    pub fn convert_with_heading(&self, document: &str) -> Conversion {
        let mut fenced = FencedBodies::default();
        let fragment = self
            .passes
            .iter()
            .fold(document.to_string(), |fragment, pass| {
                let next = pass.apply(fragment, &mut fenced);
                trace!("after {}: {} bytes", pass.name, next.len());
                next
            });
        let normalized = normalize(&fragment);
        let heading = first_heading(&normalized).map(|text| fenced.restore(&text));
        Conversion {
            fragment: fenced.restore(&normalized),
            heading,
        }
    }

    /// Run the passes up to and including `last`, without normalizing or
    /// restoring fenced bodies. Returns `None` for an unknown pass name.
    pub fn convert_until(&self, document: &str, last: &str) -> Option<String> {
        let end = self.passes.iter().position(|p| p.name == last)?;
        let mut fenced = FencedBodies::default();
        Some(
            self.passes[..=end]
                .iter()
                .fold(document.to_string(), |fragment, pass| {
                    pass.apply(fragment, &mut fenced)
                }),
        )
    }
}
