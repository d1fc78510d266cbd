//! Source-to-destination naming and sidebar ordering.
//!
//! ## Names
//!
//! A document's entry name is its file name with the document extension
//! removed. Docusaurus uses `intro` as a section's landing page where Nextra
//! expects `index`, so that one name is mapped:
//!
//! - `getting-started.md` → `getting-started` (written as `getting-started.mdx`)
//! - `intro.mdx` → `index` (written as `index.mdx`)
//! - `.drafts/`, `.DS_Store` → hidden, ignored entirely
//!
//! ## Ordering
//!
//! Documents are ordered by `sidebar_position`: positioned documents first,
//! ascending, then unpositioned documents by name. Sub-directories follow all
//! documents, by name.

use std::cmp::Ordering;

/// Source name of a section landing page.
pub const SOURCE_LANDING_PAGE: &str = "intro";
/// Destination name of a section landing page.
pub const DEST_LANDING_PAGE: &str = "index";

/// Hidden entries (dotfiles and dot-directories) are never converted.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// The file stem of `file_name` if its extension is one of `extensions`.
///
/// - `"guide.mdx"` with `["md", "mdx"]` → `Some("guide")`
/// - `"config.json"` → `None`
/// - `"mdx"` (no extension) → `None`
pub fn document_stem<'a>(file_name: &'a str, extensions: &[String]) -> Option<&'a str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !extensions.iter().any(|e| e == ext) {
        return None;
    }
    Some(stem)
}

/// Destination entry name for a document stem.
pub fn destination_name(stem: &str) -> &str {
    if stem == SOURCE_LANDING_PAGE {
        DEST_LANDING_PAGE
    } else {
        stem
    }
}

/// A converted document as it appears in its directory's manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEntry {
    pub name: String,
    pub position: Option<f64>,
}

/// Sidebar order: positioned before unpositioned, positions ascending, names
/// breaking ties and ordering the unpositioned.
pub fn compare_documents(a: &DocumentEntry, b: &DocumentEntry) -> Ordering {
    match (a.position, b.position) {
        (Some(pa), Some(pb)) => pa.total_cmp(&pb).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// Final manifest order: sorted documents, then directories by name.
pub fn manifest_order(mut documents: Vec<DocumentEntry>, mut directories: Vec<String>) -> Vec<String> {
    documents.sort_by(compare_documents);
    directories.sort();

    documents
        .into_iter()
        .map(|d| d.name)
        .chain(directories)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["md".to_string(), "mdx".to_string()]
    }

    fn doc(name: &str, position: Option<f64>) -> DocumentEntry {
        DocumentEntry {
            name: name.to_string(),
            position,
        }
    }

    #[test]
    fn stems_for_documents() {
        assert_eq!(document_stem("guide.mdx", &exts()), Some("guide"));
        assert_eq!(document_stem("guide.md", &exts()), Some("guide"));
        assert_eq!(document_stem("v1.2.md", &exts()), Some("v1.2"));
    }

    #[test]
    fn non_documents_have_no_stem() {
        assert_eq!(document_stem("config.json", &exts()), None);
        assert_eq!(document_stem("blur.tsx", &exts()), None);
        assert_eq!(document_stem("README", &exts()), None);
        assert_eq!(document_stem("guide.MD", &exts()), None);
    }

    #[test]
    fn intro_becomes_index() {
        assert_eq!(destination_name("intro"), "index");
        assert_eq!(destination_name("introduction"), "introduction");
        assert_eq!(destination_name("index"), "index");
    }

    #[test]
    fn hidden_entries() {
        assert!(is_hidden(".DS_Store"));
        assert!(is_hidden(".drafts"));
        assert!(!is_hidden("visible.md"));
    }

    #[test]
    fn positioned_before_unpositioned() {
        let order = manifest_order(
            vec![
                doc("zeta", None),
                doc("third", Some(3.0)),
                doc("alpha", None),
                doc("first", Some(1.0)),
                doc("second", Some(2.0)),
            ],
            vec![],
        );
        assert_eq!(order, vec!["first", "second", "third", "alpha", "zeta"]);
    }

    #[test]
    fn equal_positions_tie_break_by_name() {
        let order = manifest_order(vec![doc("b", Some(1.0)), doc("a", Some(1.0))], vec![]);
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn negative_positions_sort_first() {
        let order = manifest_order(vec![doc("zero", Some(0.0)), doc("neg", Some(-1.0))], vec![]);
        assert_eq!(order, vec!["neg", "zero"]);
    }

    #[test]
    fn fractional_positions_sort_between_integers() {
        let order = manifest_order(
            vec![
                doc("two", Some(2.0)),
                doc("aaa", None),
                doc("onehalf", Some(1.5)),
                doc("one", Some(1.0)),
            ],
            vec![],
        );
        assert_eq!(order, vec!["one", "onehalf", "two", "aaa"]);
    }

    #[test]
    fn directories_follow_documents() {
        let order = manifest_order(
            vec![doc("page", None), doc("index", Some(5.0))],
            vec!["zoo".to_string(), "api".to_string()],
        );
        assert_eq!(order, vec!["index", "page", "api", "zoo"]);
    }
}
