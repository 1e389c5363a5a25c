//! The shared pattern table.
//!
//! Every rewrite the pipeline performs is declared here as a [`PatternRule`]:
//! a regex, a replacement template, and a [`MatchMode`] telling the compiler
//! how `^`, `$` and `.` behave for that rule. The pipeline decides *when* a
//! rule runs; this module only decides *what* it matches.
//!
//! Replacement templates use the `regex` crate syntax (`${1}`, `${name}`).
//! Rules that produce block-level elements pad their output with blank lines
//! so the paragraph pass sees each block as its own segment.

use regex::{Regex, RegexBuilder};

/// How a rule's pattern is anchored against the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Single-line match. `^`/`$` anchor the whole fragment, `.` stops at newlines.
    Inline,
    /// Multi-line anchored: `^` and `$` match at every line boundary.
    Line,
    /// Line-anchored, and `.` also matches `\n` so one match can span lines.
    Spanning,
}

/// A (pattern, replacement, mode) triple.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub mode: MatchMode,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl PatternRule {
    /// Compile the pattern with the flags implied by [`Self::mode`].
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(self.pattern)
            .multi_line(self.mode != MatchMode::Inline)
            .dot_matches_new_line(self.mode == MatchMode::Spanning)
            .build()
    }
}

// ============================================================================
// Blocks
// ============================================================================

/// A fence line, an optional language tag, and everything up to the next
/// closing fence line. Lazy, so consecutive fenced blocks match separately.
///
/// `${body}` is not filled from the capture: the pipeline swaps in a
/// placeholder and keeps the real body aside until the end.
pub static FENCED_CODE: PatternRule = PatternRule {
    name: "fenced_code",
    mode: MatchMode::Spanning,
    pattern: r"^```[ \t]*(?P<lang>[^\n`]*)\n(?P<body>.*?)^```[ \t]*$",
    replacement: "\n\n<pre><code>${body}</code></pre>\n\n",
};

/// Level 3, 2, 1. The marker counts are mutually exclusive (`#` must be
/// followed by whitespace), so the order only matters for readability.
pub static HEADINGS: [PatternRule; 3] = [
    PatternRule {
        name: "heading_3",
        mode: MatchMode::Line,
        pattern: r"^###[ \t]+(.+?)[ \t]*$",
        replacement: "\n\n<h3>${1}</h3>\n\n",
    },
    PatternRule {
        name: "heading_2",
        mode: MatchMode::Line,
        pattern: r"^##[ \t]+(.+?)[ \t]*$",
        replacement: "\n\n<h2>${1}</h2>\n\n",
    },
    PatternRule {
        name: "heading_1",
        mode: MatchMode::Line,
        pattern: r"^#[ \t]+(.+?)[ \t]*$",
        replacement: "\n\n<h1>${1}</h1>\n\n",
    },
];

// ============================================================================
// Inline formatting
// ============================================================================

/// Longest marker first: `***x***` must not be split into `**` + `*`.
///
/// Each span is the shortest run of text between two markers on one line.
/// Whitespace next to a marker is allowed, so `2 * 3 * 4` is emphasized.
pub static EMPHASIS: [PatternRule; 3] = [
    PatternRule {
        name: "strong_emphasis",
        mode: MatchMode::Inline,
        pattern: r"\*\*\*(.+?)\*\*\*",
        replacement: "<strong><em>${1}</em></strong>",
    },
    PatternRule {
        name: "strong",
        mode: MatchMode::Inline,
        pattern: r"\*\*(.+?)\*\*",
        replacement: "<strong>${1}</strong>",
    },
    PatternRule {
        name: "emphasis",
        mode: MatchMode::Inline,
        pattern: r"\*(.+?)\*",
        replacement: "<em>${1}</em>",
    },
];

pub static INLINE_CODE: PatternRule = PatternRule {
    name: "inline_code",
    mode: MatchMode::Inline,
    pattern: r"`([^`\n]+)`",
    replacement: "<code>${1}</code>",
};

/// Label and URL are copied as written. No escaping, no URL validation.
pub static LINK: PatternRule = PatternRule {
    name: "link",
    mode: MatchMode::Inline,
    pattern: r"\[([^\]\n]+)\]\(([^)\n]+)\)",
    replacement: r#"<a href="${2}">${1}</a>"#,
};

// ============================================================================
// Lists
// ============================================================================

/// `- item` and `1. item` both become a plain `<li>`; the list type is lost.
pub static LIST_ITEM: PatternRule = PatternRule {
    name: "list_item",
    mode: MatchMode::Line,
    pattern: r"^(?:-|\d+\.)[ \t]+(.+?)[ \t]*$",
    replacement: "<li>${1}</li>",
};

/// A run of consecutive `<li>` lines.
pub static LIST_GROUP: PatternRule = PatternRule {
    name: "list_group",
    mode: MatchMode::Line,
    pattern: r"^<li>.*</li>$(?:\n<li>.*</li>$)*",
    replacement: "\n\n<ul>\n${0}\n</ul>\n\n",
};

/// Two list containers separated only by whitespace become one container.
pub static LIST_MERGE: PatternRule = PatternRule {
    name: "list_merge",
    mode: MatchMode::Inline,
    pattern: r"\n</ul>\s*<ul>\n",
    replacement: "\n",
};

// ============================================================================
// Paragraphs
// ============================================================================

/// A blank-line boundary. Trailing whitespace of the segment before it goes
/// with the boundary; indentation of the line after it stays.
pub static PARAGRAPH_BREAK: PatternRule = PatternRule {
    name: "paragraph_break",
    mode: MatchMode::Inline,
    pattern: r"[ \t]*\n(?:[ \t]*\n)+",
    replacement: "</p>\n<p>",
};

/// Every rule in the table, in pipeline order.
pub fn all() -> Vec<&'static PatternRule> {
    let mut rules: Vec<&'static PatternRule> = vec![&FENCED_CODE];
    rules.extend(HEADINGS.iter());
    rules.extend(EMPHASIS.iter());
    rules.extend([
        &INLINE_CODE,
        &LINK,
        &LIST_ITEM,
        &LIST_GROUP,
        &LIST_MERGE,
        &PARAGRAPH_BREAK,
    ]);
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rule: &PatternRule, text: &str) -> String {
        rule.compile()
            .unwrap()
            .replace_all(text, rule.replacement)
            .into_owned()
    }

    #[test]
    fn every_rule_compiles() {
        for rule in all() {
            assert!(rule.compile().is_ok(), "rule {} failed to compile", rule.name);
        }
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = all().iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn line_mode_anchors_each_line() {
        let out = apply(&HEADINGS[2], "intro\n# Title\nbody");
        assert!(out.contains("<h1>Title</h1>"));
        assert!(out.starts_with("intro\n"));
    }

    #[test]
    fn inline_mode_does_not_anchor_lines() {
        let rule = PatternRule {
            name: "start_anchor",
            mode: MatchMode::Inline,
            pattern: r"^b",
            replacement: "X",
        };
        assert_eq!(apply(&rule, "a\nb"), "a\nb");
    }

    #[test]
    fn heading_requires_space_after_marker() {
        assert_eq!(apply(&HEADINGS[2], "#hashtag"), "#hashtag");
    }

    #[test]
    fn heading_one_does_not_match_deeper_headings() {
        assert_eq!(apply(&HEADINGS[2], "## Sub"), "## Sub");
        assert_eq!(apply(&HEADINGS[1], "### Deeper"), "### Deeper");
    }

    #[test]
    fn heading_trims_trailing_whitespace() {
        let out = apply(&HEADINGS[1], "## Spaced   ");
        assert!(out.contains("<h2>Spaced</h2>"));
    }

    #[test]
    fn fenced_code_captures_language_and_body() {
        let re = FENCED_CODE.compile().unwrap();
        let caps = re.captures("```rust\nfn main() {}\n```").unwrap();
        assert_eq!(&caps["lang"], "rust");
        assert_eq!(&caps["body"], "fn main() {}\n");
    }

    #[test]
    fn fenced_code_matches_empty_body() {
        let re = FENCED_CODE.compile().unwrap();
        let caps = re.captures("```\n```").unwrap();
        assert_eq!(&caps["body"], "");
    }

    #[test]
    fn fenced_code_is_lazy() {
        let re = FENCED_CODE.compile().unwrap();
        let text = "```\na\n```\n\ntext\n\n```\nb\n```";
        assert_eq!(re.find_iter(text).count(), 2);
    }

    #[test]
    fn emphasis_allows_spaced_asterisks() {
        assert_eq!(apply(&EMPHASIS[2], "2 * 3 * 4"), "2 <em> 3 </em> 4");
    }

    #[test]
    fn strong_span_may_contain_single_markers() {
        assert_eq!(
            apply(&EMPHASIS[1], "**bold *and* italic**"),
            "<strong>bold *and* italic</strong>"
        );
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(apply(&EMPHASIS[2], "*open\nclose*"), "*open\nclose*");
    }

    #[test]
    fn strong_matches_shortest_span() {
        assert_eq!(
            apply(&EMPHASIS[1], "**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn link_inserts_label_and_url_verbatim() {
        assert_eq!(
            apply(&LINK, "see [the docs](https://example.com/a?b=c&d)"),
            r#"see <a href="https://example.com/a?b=c&d">the docs</a>"#
        );
    }

    #[test]
    fn link_url_may_contain_spaces() {
        assert_eq!(
            apply(&LINK, "[a](my file.md)"),
            r#"<a href="my file.md">a</a>"#
        );
    }

    #[test]
    fn link_does_not_cross_lines() {
        assert_eq!(apply(&LINK, "[a](b\nc)"), "[a](b\nc)");
    }

    #[test]
    fn list_item_accepts_dash_and_numeral() {
        assert_eq!(apply(&LIST_ITEM, "- one"), "<li>one</li>");
        assert_eq!(apply(&LIST_ITEM, "12. twelve"), "<li>twelve</li>");
    }

    #[test]
    fn list_item_rejects_rule_lines() {
        assert_eq!(apply(&LIST_ITEM, "---"), "---");
        assert_eq!(apply(&LIST_ITEM, "-dash"), "-dash");
    }

    #[test]
    fn list_group_wraps_a_whole_run() {
        let out = apply(&LIST_GROUP, "<li>a</li>\n<li>b</li>");
        assert_eq!(out, "\n\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n\n");
    }

    #[test]
    fn list_merge_joins_whitespace_separated_containers() {
        let out = apply(&LIST_MERGE, "<ul>\n<li>a</li>\n</ul>\n\n\n<ul>\n<li>b</li>\n</ul>");
        assert_eq!(out, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn paragraph_break_swallows_whitespace_only_lines() {
        assert_eq!(apply(&PARAGRAPH_BREAK, "a  \n \t \n\nb"), "a</p>\n<p>b");
    }

    #[test]
    fn paragraph_break_keeps_next_line_indentation() {
        assert_eq!(apply(&PARAGRAPH_BREAK, "a\n\n    b"), "a</p>\n<p>    b");
    }
}
