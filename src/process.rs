//! Single-document conversion.
//!
//! For one source file: split off the frontmatter, record a redirect when the
//! page declared a legacy `slug`, run the rewrite pipeline over the body and
//! write the result to its destination. The parsed metadata is handed back so
//! the walker can order the page in its directory manifest.
//!
//! The frontmatter itself is not carried over: Nextra reads titles from the
//! first heading and order from `_meta.js`.

use crate::convert::RunContext;
use crate::frontmatter::{self, FrontmatterError, LEGACY_PATH_KEY, Metadata};
use crate::rewrite::apply_rewriters;
use crate::types::ConvertEvent;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("bad frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
}

/// Convert `source` into `dest`, returning the document's metadata.
pub fn process_document(
    source: &Path,
    dest: &Path,
    ctx: &mut RunContext,
) -> Result<Metadata, ProcessError> {
    let raw = fs::read_to_string(source).map_err(|e| ProcessError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let document = frontmatter::split(&raw).map_err(|e| ProcessError::Frontmatter {
        path: source.to_path_buf(),
        source: e,
    })?;

    let redirect = match (document.metadata.slug(), document.metadata.get(LEGACY_PATH_KEY)) {
        (Some(slug), _) => Some(ctx.redirects.record(slug, dest).clone()),
        (None, Some(value)) => {
            warn!(path = %source.display(), %value, "ignoring non-string slug");
            None
        }
        (None, None) => None,
    };

    let converted = apply_rewriters(&document.body, ctx.options.admonitions);
    let text = converted.trim_start();

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| ProcessError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(dest, text).map_err(|e| ProcessError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let source_rel = ctx.source_relative(source);
    let dest_rel = ctx.dest_relative(dest);
    info!(source = %source_rel, destination = %dest_rel, "converted");
    ctx.events.push(ConvertEvent::DocumentConverted {
        source: source_rel,
        destination: dest_rel,
        redirect,
    });

    Ok(document.metadata)
}
