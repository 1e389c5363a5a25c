//! Behavioral properties of the document converter, exercised through the
//! public `simple_pages::markup` API.
//!
//! Run with: cargo test --test markup_properties

use simple_pages::markup::{self, convert, normalize};

const SAMPLE: &str = "\
# Getting started

Install the tool, then read the **whole** guide.

## Steps

1. Download the *binary*
2. Put it on your `PATH`
- Run it

See [the guide](guides/install.html).

```sh
# not a heading
- not a list
*not emphasis*
```

### Done
";

const BLOCK_TAGS: &[&str] = &["<h1>", "<h2>", "<h3>", "<pre>", "<ul>"];

#[test]
fn normalization_is_idempotent() {
    for doc in [
        SAMPLE,
        "plain",
        "",
        "- a\n\n- b",
        "```\nx\n```",
        "# T\nbody",
        "<p><p></p></p>",
        "<p>a<p><p></p></p>",
        "<p><p></p><ul><li>x</li></ul></p>",
    ] {
        let once = convert(doc);
        assert_eq!(normalize(&once), once, "not idempotent for {doc:?}");
    }
    for fragment in ["<p>a<p><p></p></p>", "<p><p><p></p></p>tail</p>"] {
        let once = normalize(fragment);
        assert_eq!(normalize(&once), once, "not idempotent for {fragment:?}");
    }
}

#[test]
fn fence_contents_are_verbatim() {
    let html = convert(SAMPLE);
    assert!(html.contains("<pre><code># not a heading\n- not a list\n*not emphasis*\n</code></pre>"));
}

#[test]
fn two_fences_are_matched_independently() {
    assert_eq!(
        convert("```\na\n```\n\nmiddle\n\n```\nb\n```"),
        "<pre><code>a\n</code></pre>\n<p>middle</p>\n<pre><code>b\n</code></pre>"
    );
}

#[test]
fn blank_lines_inside_a_fence_do_not_split_it() {
    assert_eq!(
        convert("```\nfirst\n\nsecond\n```"),
        "<pre><code>first\n\nsecond\n</code></pre>"
    );
}

#[test]
fn first_block_is_the_heading() {
    let html = convert("# Title\n\nBody text");
    assert!(html.starts_with("<h1>Title</h1>"));
}

#[test]
fn dash_lines_form_one_list() {
    let html = convert("- one\n- two\n- three");
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 3);
}

#[test]
fn blocks_are_never_wrapped_in_paragraphs() {
    let html = convert(SAMPLE);
    for tag in BLOCK_TAGS {
        assert!(
            !html.contains(&format!("<p>{tag}")),
            "{tag} wrapped in a paragraph:\n{html}"
        );
    }
    assert!(!html.contains("<p></p>"));
}

#[test]
fn sample_document_converts_completely() {
    assert_eq!(
        convert(SAMPLE),
        "<h1>Getting started</h1>\n\
         <p>Install the tool, then read the <strong>whole</strong> guide.</p>\n\
         <h2>Steps</h2>\n\
         <ul>\n\
         <li>Download the <em>binary</em></li>\n\
         <li>Put it on your <code>PATH</code></li>\n\
         <li>Run it</li>\n\
         </ul>\n\
         <p>See <a href=\"guides/install.html\">the guide</a>.</p>\n\
         <pre><code># not a heading\n- not a list\n*not emphasis*\n</code></pre>\n\
         <h3>Done</h3>"
    );
}

#[test]
fn triple_asterisks_nest_strong_and_em() {
    assert_eq!(convert("***x***"), "<p><strong><em>x</em></strong></p>");
}

#[test]
fn plain_text_is_one_paragraph() {
    assert_eq!(convert("just some words"), "<p>just some words</p>");
}

#[test]
fn plain_text_keeps_indentation() {
    assert_eq!(convert("a\n\n    b"), "<p>a</p>\n<p>    b</p>");
}

#[test]
fn nested_emphasis_leaves_no_markers() {
    let html = convert("**bold *and* italic**");
    assert_eq!(html, "<p><strong>bold <em>and</em> italic</strong></p>");
    assert!(!html.contains('*'));
}

#[test]
fn document_text_is_never_taken_for_a_fence_placeholder() {
    let html = convert("x \u{E000}0\u{E001} y\n\n```\nSECRET\n```");
    assert_eq!(html.matches("SECRET").count(), 1);
    assert!(html.starts_with("<p>x \u{E000}0\u{E001} y</p>"));
}

#[test]
fn blank_input_is_empty() {
    assert_eq!(convert(""), "");
    assert_eq!(convert("\n\n\n"), "");
}

#[test]
fn crlf_converts_like_lf() {
    let lf = "# T\n\n- a\n- b\n\n```\nx\n```\n";
    assert_eq!(convert(&lf.replace('\n', "\r\n")), convert(lf));
}

#[test]
fn pipeline_passes_are_in_documented_order() {
    let pipeline = markup::Pipeline::standard().unwrap();
    let names: Vec<&str> = pipeline.passes().iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        [
            "line_endings",
            "fenced_code",
            "headings",
            "emphasis",
            "inline_code",
            "links",
            "list_items",
            "list_grouping",
            "merge_lists",
            "paragraphs",
        ]
    );
}
