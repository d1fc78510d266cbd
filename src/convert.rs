//! Directory walking and the top-level conversion entry point.
//!
//! ## Layout
//!
//! ```text
//! docs/                              content/
//! ├── intro.md                       ├── _meta.js        ← index, install, guides
//! ├── install.mdx                    ├── index.mdx
//! ├── .drafts/          (hidden)  →  ├── install.mdx
//! ├── code/             (no docs)    └── guides/
//! │   └── blur.tsx                       ├── _meta.js
//! └── guides/                            └── routing.mdx
//!     └── routing.md
//! ```
//!
//! The destination is rebuilt from scratch on every run. Each source directory
//! is walked depth-first, sub-directories before documents, in name order.
//! A directory only appears in the output (and in its parent's manifest) when
//! there is at least one document somewhere below it; the walk reports that
//! bottom-up, so every directory is read exactly once.
//!
//! ## Failure
//!
//! Any I/O error aborts the run. Whatever was written up to that point stays
//! in the destination.

use crate::manifest::{MANIFEST_FILE, write_manifest};
use crate::naming::{DocumentEntry, destination_name, document_stem, is_hidden, manifest_order};
use crate::process::{ProcessError, process_document};
use crate::redirect::{Redirect, RedirectRecorder};
use crate::rewrite::AdmonitionMode;
use crate::types::{ConvertEvent, Conversion};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("IO error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Unexpected file type (neither file nor directory): {0}")]
    UnexpectedEntry(PathBuf),
    #[error("Duplicate entry '{name}' in {dir}")]
    DuplicateEntry { dir: PathBuf, name: String },
}

/// Knobs for a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub admonitions: AdmonitionMode,
    /// File name of each directory manifest.
    pub manifest_file: String,
    /// Extension given to every converted document.
    pub output_extension: String,
    /// Source extensions treated as documents.
    pub extensions: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            admonitions: AdmonitionMode::default(),
            manifest_file: MANIFEST_FILE.to_string(),
            output_extension: "mdx".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
        }
    }
}

/// State owned by one conversion run and threaded through the walk.
#[derive(Debug)]
pub struct RunContext {
    pub options: ConvertOptions,
    source_root: PathBuf,
    dest_root: PathBuf,
    pub redirects: RedirectRecorder,
    pub events: Vec<ConvertEvent>,
}

impl RunContext {
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        options: ConvertOptions,
    ) -> Self {
        let dest_root = dest_root.into();
        Self {
            options,
            source_root: source_root.into(),
            redirects: RedirectRecorder::new(dest_root.clone()),
            dest_root,
            events: Vec::new(),
        }
    }

    /// Forget redirects and events from any previous run.
    pub fn reset(&mut self) {
        self.redirects.reset();
        self.events.clear();
    }

    pub fn source_relative(&self, path: &Path) -> String {
        relative_display(&self.source_root, path)
    }

    pub fn dest_relative(&self, path: &Path) -> String {
        relative_display(&self.dest_root, path)
    }

    pub fn into_conversion(self) -> Conversion {
        Conversion {
            redirects: self.redirects.into_redirects(),
            events: self.events,
        }
    }
}

/// Convert `source_dir` into `dest_dir` with default options.
///
/// Returns the redirects for every page that declared a legacy slug, in
/// conversion order.
pub fn convert(source_dir: &Path, dest_dir: &Path) -> Result<Vec<Redirect>, ConvertError> {
    Ok(convert_with(source_dir, dest_dir, ConvertOptions::default())?.redirects)
}

/// Convert `source_dir` into `dest_dir`, returning redirects and run events.
pub fn convert_with(
    source_dir: &Path,
    dest_dir: &Path,
    options: ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let mut ctx = RunContext::new(source_dir, dest_dir, options);
    run(&mut ctx)?;
    Ok(ctx.into_conversion())
}

/// Run a full conversion with an existing context.
///
/// The context is reset first, the destination tree is deleted and its root
/// recreated, then the source tree is walked.
pub fn run(ctx: &mut RunContext) -> Result<(), ConvertError> {
    ctx.reset();
    let source_root = ctx.source_root.clone();
    let dest_root = ctx.dest_root.clone();

    match fs::remove_dir_all(&dest_root) {
        Ok(()) => debug!(path = %dest_root.display(), "removed previous output"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error(&dest_root, e)),
    }
    fs::create_dir_all(&dest_root).map_err(|e| io_error(&dest_root, e))?;

    info!(
        source = %source_root.display(),
        destination = %dest_root.display(),
        "converting"
    );
    walk_directory(&source_root, &dest_root, ctx)?;
    Ok(())
}

/// Convert one directory. Returns whether anything was written for it, which
/// is the case exactly when a document exists somewhere below `source`.
pub fn walk_directory(
    source: &Path,
    dest: &Path,
    ctx: &mut RunContext,
) -> Result<bool, ConvertError> {
    let entries = collect_entries(source)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut directories = Vec::new();
    let mut documents = Vec::new();

    for entry in entries.iter().filter(|e| e.is_dir) {
        if walk_directory(&entry.path, &dest.join(&entry.name), ctx)? {
            seen.insert(entry.name.clone());
            directories.push(entry.name.clone());
        } else {
            let rel = ctx.source_relative(&entry.path);
            info!(source = %rel, "skipping directory without documents");
            ctx.events
                .push(ConvertEvent::DirectorySkipped { source: rel });
        }
    }

    for entry in entries.iter().filter(|e| !e.is_dir) {
        let Some(stem) = document_stem(&entry.name, &ctx.options.extensions) else {
            debug!(path = %entry.path.display(), "ignoring non-document file");
            continue;
        };
        let name = destination_name(stem).to_string();
        if !seen.insert(name.clone()) {
            return Err(ConvertError::DuplicateEntry {
                dir: source.to_path_buf(),
                name,
            });
        }

        let dest_path = dest.join(format!("{name}.{}", ctx.options.output_extension));
        let metadata = process_document(&entry.path, &dest_path, ctx)?;
        documents.push(DocumentEntry {
            name,
            position: metadata.sidebar_position(),
        });
    }

    let names = manifest_order(documents, directories);
    if names.is_empty() {
        return Ok(false);
    }

    write_manifest(dest, &names, &ctx.options.manifest_file).map_err(|e| io_error(dest, e))?;
    let directory = ctx.dest_relative(dest);
    info!(directory = %directory, entries = names.len(), "wrote manifest");
    ctx.events.push(ConvertEvent::ManifestWritten {
        directory,
        entries: names,
    });

    Ok(true)
}

struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Visible entries of `dir`, classified and sorted by name.
fn collect_entries(dir: &Path) -> Result<Vec<Entry>, ConvertError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden(&name) {
            continue;
        }

        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            // Dangling symlink
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConvertError::UnexpectedEntry(path));
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        let is_dir = if metadata.is_dir() {
            true
        } else if metadata.is_file() {
            false
        } else {
            return Err(ConvertError::UnexpectedEntry(path));
        };

        entries.push(Entry { name, path, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn io_error(path: &Path, source: io::Error) -> ConvertError {
    ConvertError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `path` relative to `root`, `/`-separated. Falls back to the full path.
fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
