//! Redirects from legacy Docusaurus slugs to the new Nextra page locations.
//!
//! Each converted document that declared a `slug` gets one [`Redirect`] from
//! that slug to the URL its destination file will be served at. Records are
//! kept in the order documents were converted and are never de-duplicated.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// One redirect entry, in the shape Next.js `redirects()` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub source: String,
    pub destination: String,
    pub permanent: bool,
}

/// Collects redirects for a single conversion run.
#[derive(Debug, Clone)]
pub struct RedirectRecorder {
    dest_root: PathBuf,
    redirects: Vec<Redirect>,
}

impl RedirectRecorder {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
            redirects: Vec::new(),
        }
    }

    /// Append a redirect from `legacy_path` to wherever `dest_path` is served.
    pub fn record(&mut self, legacy_path: &str, dest_path: &Path) -> &Redirect {
        let redirect = Redirect {
            source: normalize_legacy_path(legacy_path),
            destination: public_path(&self.dest_root, dest_path),
            permanent: true,
        };
        self.redirects.push(redirect);
        &self.redirects[self.redirects.len() - 1]
    }

    /// Drop every recorded redirect.
    pub fn reset(&mut self) {
        self.redirects.clear();
    }

    pub fn redirects(&self) -> &[Redirect] {
        &self.redirects
    }

    pub fn into_redirects(self) -> Vec<Redirect> {
        self.redirects
    }
}

/// Ensure a legacy path starts with `/`.
pub fn normalize_legacy_path(legacy_path: &str) -> String {
    if legacy_path.starts_with('/') {
        legacy_path.to_string()
    } else {
        format!("/{legacy_path}")
    }
}

/// URL path a destination file is served at.
///
/// The destination root prefix and the file extension are dropped, segments
/// are joined with `/`, and a trailing `index` page resolves to its directory:
///
/// - `<root>/simple.mdx` → `/simple`
/// - `<root>/nested/code-blocks.mdx` → `/nested/code-blocks`
/// - `<root>/index.mdx` → `/`
/// - `<root>/guide/index.mdx` → `/guide`
pub fn public_path(dest_root: &Path, dest_path: &Path) -> String {
    let relative = dest_path.strip_prefix(dest_root).unwrap_or(dest_path);
    let without_ext = relative.with_extension("");

    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_added() {
        assert_eq!(normalize_legacy_path("test/simple"), "/test/simple");
        assert_eq!(normalize_legacy_path("/already"), "/already");
    }

    #[test]
    fn record_strips_root_and_extension() {
        let mut recorder = RedirectRecorder::new("/out/content");
        let redirect = recorder
            .record("test/simple", Path::new("/out/content/simple.mdx"))
            .clone();

        assert_eq!(
            redirect,
            Redirect {
                source: "/test/simple".to_string(),
                destination: "/simple".to_string(),
                permanent: true,
            }
        );
    }

    #[test]
    fn nested_destination() {
        let root = Path::new("/out");
        assert_eq!(
            public_path(root, Path::new("/out/nested/code-blocks.mdx")),
            "/nested/code-blocks"
        );
    }

    #[test]
    fn index_pages_resolve_to_directory() {
        let root = Path::new("/out");
        assert_eq!(public_path(root, Path::new("/out/index.mdx")), "/");
        assert_eq!(public_path(root, Path::new("/out/guide/index.mdx")), "/guide");
        assert_eq!(
            public_path(root, Path::new("/out/guide/indexing.mdx")),
            "/guide/indexing"
        );
    }

    #[test]
    fn duplicates_kept_in_order() {
        let mut recorder = RedirectRecorder::new("/out");
        recorder.record("/same", Path::new("/out/a.mdx"));
        recorder.record("/same", Path::new("/out/b.mdx"));

        let destinations: Vec<&str> = recorder
            .redirects()
            .iter()
            .map(|r| r.destination.as_str())
            .collect();
        assert_eq!(destinations, vec!["/a", "/b"]);
    }

    #[test]
    fn reset_clears_records() {
        let mut recorder = RedirectRecorder::new("/out");
        recorder.record("/old", Path::new("/out/new.mdx"));
        recorder.reset();
        assert!(recorder.redirects().is_empty());
    }

    #[test]
    fn serializes_for_next_config() {
        let redirect = Redirect {
            source: "/old".to_string(),
            destination: "/new".to_string(),
            permanent: true,
        };
        let json = serde_json::to_string(&redirect).unwrap();
        assert_eq!(json, r#"{"source":"/old","destination":"/new","permanent":true}"#);
    }
}
