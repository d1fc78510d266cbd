//! Shared test utilities for the docs-migrate test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let source = tmp.path().join("docs");
//! write_doc(&source, "guides/extra.md", "# Extra\n");
//!
//! convert(&source, &tmp.path().join("out")).unwrap();
//! assert_eq!(
//!     manifest_names(&tmp.path().join("out/guides")),
//!     vec!["routing", "deployment", "extra"]
//! );
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::manifest::MANIFEST_FILE;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to `<tmp>/docs` and return the temp directory.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, &tmp.path().join("docs")).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_doc(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Entry names listed in `dir/_meta.js`, in file order. Panics if missing.
pub fn manifest_names(dir: &Path) -> Vec<String> {
    let path = dir.join(MANIFEST_FILE);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("manifest {} unreadable: {e}", path.display()));

    text.lines()
        .filter_map(|line| {
            line.trim()
                .strip_prefix('\'')?
                .strip_suffix("': '',")
                .map(str::to_string)
        })
        .collect()
}

/// Every file under `root` as relative path → contents.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}
