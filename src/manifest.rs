//! Nextra `_meta.js` navigation manifests.
//!
//! One manifest per output directory, listing its pages and sub-directories
//! in sidebar order. Labels are left empty so Nextra falls back to each
//! page's own title:
//!
//! ```text
//! export default {
//!   'index': '',
//!   'getting-started': '',
//!   'guides': '',
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "_meta.js";

/// Render the manifest text for `names`, in the order given.
pub fn render_manifest(names: &[String]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|name| format!("  '{}': '',", escape_js_single_quoted(name)))
        .collect();
    format!("export default {{\n{}\n}}\n", entries.join("\n"))
}

/// Write the manifest for `names` into `dir`, creating `dir` if needed.
///
/// Returns the text that was written.
pub fn write_manifest(dir: &Path, names: &[String], file_name: &str) -> io::Result<String> {
    fs::create_dir_all(dir)?;
    let text = render_manifest(names);
    fs::write(dir.join(file_name), &text)?;
    Ok(text)
}

fn escape_js_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
