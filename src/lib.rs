//! # docs-migrate
//!
//! One-way migration of a Docusaurus documentation tree into Nextra's
//! conventions. The source tree is read, never modified; the destination tree
//! is deleted and rebuilt from scratch on every run.
//!
//! # Pipeline
//!
//! ```text
//! walk       docs/           →  one call per document, sub-directories first
//! split      raw text        →  frontmatter metadata + body
//! redirect   metadata.slug   →  { source, destination, permanent }
//! rewrite    body            →  callouts, clean fences, no MDX components
//! write      body            →  content/<name>.mdx
//! manifest   directory       →  content/<dir>/_meta.js
//! ```
//!
//! Data only flows downward: the walker calls the document processor, which
//! calls the rewriters and the redirect recorder. Nothing calls back up.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | Top-level [`convert::convert`] entry point and the recursive directory walk |
//! | [`process`] | Converts a single document and records its redirect |
//! | [`frontmatter`] | Splits YAML frontmatter from the document body |
//! | [`rewrite`] | Pure text rewrites: admonitions, code fences, MDX components |
//! | [`redirect`] | Redirect records and the per-run recorder |
//! | [`naming`] | `intro` → `index`, document extensions, sidebar ordering |
//! | [`manifest`] | `_meta.js` rendering and writing |
//! | [`config`] | `convert.toml` loading, merging and validation |
//! | [`types`] | Run events and the [`types::Conversion`] result |
//! | [`output`] | CLI summary formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Text Rewrites, Not an MDX AST
//!
//! The constructs being rewritten (admonition fences, code fence info
//! strings, import lines, capitalised JSX tags) are line-shaped, and anything
//! else must come through byte for byte. Regex rewrites keep unrelated
//! content untouched where a parse-and-print round trip would reformat it.
//!
//! ## Explicit Run Context
//!
//! The redirect list, the options and the event log live in a
//! [`convert::RunContext`] threaded through the walk and returned at the end.
//! Two conversions never share state, so tests run in parallel safely.
//!
//! ## Bottom-Up Pruning
//!
//! A directory is only emitted if it holds a document somewhere below it.
//! The walk returns that fact from each recursive call instead of scanning
//! sub-trees twice; nothing is created for a directory until one of its
//! documents or manifests is written.

pub mod config;
pub mod convert;
pub mod frontmatter;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod process;
pub mod redirect;
pub mod rewrite;
pub mod types;

pub use convert::{ConvertError, ConvertOptions, convert, convert_with};
pub use redirect::Redirect;

#[cfg(test)]
pub(crate) mod test_helpers;
