//! # Simple Pages
//!
//! A minimal static site generator for small documentation sites written in a
//! lightweight plain-text markup. Your filesystem is the data source: every
//! document becomes one HTML page, ordered by numeric prefix, and a landing
//! page lists them all.
//!
//! # Architecture: Convert, Then Wrap
//!
//! ```text
//! 1. Scan      docs/     →  Manifest      (filesystem → ordered document list)
//! 2. Generate  Manifest  →  site/         (convert each document, wrap, write)
//! ```
//!
//! The heart of the crate is [`markup`]: a pure function from one document's
//! text to one HTML fragment. It never touches the filesystem, never fails,
//! and knows nothing about page layout. Everything else (finding documents,
//! picking titles, wrapping fragments in a page shell, writing files) lives in
//! the driver modules around it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | Text → HTML fragment: ordered rewrite passes plus the fragment normalizer |
//! | [`scan`] | Stage 1: walks the source directory and produces the manifest |
//! | [`generate`] | Stage 2: converts documents in parallel and renders pages with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Types shared between stages (`Document`, `RenderedPage`) |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`output`] | CLI output formatting for each command |
//!
//! # Design Decisions
//!
//! ## Rewrites, Not a Parser
//!
//! The markup is deliberately small, so conversion is a fixed sequence of
//! regex rewrites rather than a tokenizer and AST. Each pass is named and runs
//! in a documented order; order matters (emphasis runs longest delimiter
//! first, paragraph splitting runs last). See [`markup::pipeline`].
//!
//! ## Blocks Never Nest in Paragraphs
//!
//! Block-producing passes surround their output with blank lines so every
//! block lands in its own paragraph segment. The [`markup::normalize`] pass
//! then unwraps any paragraph that contains exactly one block. Output never
//! contains `<p><ul>` or `<p><h1>`.
//!
//! ## Fenced Code Is Opaque
//!
//! Fenced block bodies are set aside as placeholders the moment they are
//! matched and restored after every other pass has run, so `*`, `-` and `[`
//! inside a fence reach the output exactly as written.
//!
//! ## Maud Over Template Engines
//!
//! The page shell is generated with [Maud](https://maud.lambda.xyz/). Site
//! strings are auto-escaped; only converted fragments and the bundled
//! stylesheet are inserted raw.
//!
//! ## NNN-Prefix Ordering
//!
//! Files use a numeric prefix (`010-`, `020-`) for explicit ordering, parsed by
//! [`naming::parse_entry_name`]. Unnumbered documents are still built and are
//! listed after the numbered ones. No front-matter, no ordering file.

pub mod config;
pub mod generate;
pub mod markup;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
