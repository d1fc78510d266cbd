//! CLI output formatting for a conversion run.
//!
//! Output is a short inventory of what the run did, in the order it happened.
//! Each document leads with its positional index and the source → destination
//! mapping; its redirect, if any, is an indented context line:
//!
//! ```text
//! Documents
//! 001 guides/routing.md → guides/routing.mdx
//! 002 intro.md → index.mdx
//!     Redirect: /docs/intro → /
//!
//! Skipped
//!     code/ (no documents)
//!
//! Manifests
//!     guides/ (1 entry)
//!     ./ (2 entries)
//!
//! Converted 2 documents, wrote 2 manifests, 1 redirect
//! ```
//!
//! `format_*` functions return lines and do no I/O; `print_*` wrappers write
//! them to stdout.

use crate::types::{ConvertEvent, Conversion};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 entry`, `2 entries`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn directory_label(directory: &str) -> String {
    format!("{}/", directory.trim_end_matches('/'))
}

/// Format the summary of a finished conversion.
pub fn format_convert_output(conversion: &Conversion) -> Vec<String> {
    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    let mut manifests = Vec::new();
    let mut converted = 0;

    for event in &conversion.events {
        match event {
            ConvertEvent::DocumentConverted {
                source,
                destination,
                redirect,
            } => {
                converted += 1;
                documents.push(format!(
                    "{} {} → {}",
                    format_index(converted),
                    source,
                    destination
                ));
                if let Some(r) = redirect {
                    documents.push(format!("    Redirect: {} → {}", r.source, r.destination));
                }
            }
            ConvertEvent::DirectorySkipped { source } => {
                skipped.push(format!("    {} (no documents)", directory_label(source)));
            }
            ConvertEvent::ManifestWritten { directory, entries } => {
                manifests.push(format!(
                    "    {} ({})",
                    directory_label(directory),
                    plural(entries.len(), "entry", "entries")
                ));
            }
        }
    }

    let mut lines = Vec::new();
    for (title, section) in [
        ("Documents", documents),
        ("Skipped", skipped),
        ("Manifests", manifests),
    ] {
        if section.is_empty() {
            continue;
        }
        lines.push(title.to_string());
        lines.extend(section);
        lines.push(String::new());
    }

    lines.push(format!(
        "Converted {}, wrote {}, {}",
        plural(conversion.documents_converted(), "document", "documents"),
        plural(conversion.manifests_written(), "manifest", "manifests"),
        plural(conversion.redirects.len(), "redirect", "redirects"),
    ));
    lines
}

/// Print the conversion summary to stdout.
pub fn print_convert_output(conversion: &Conversion) {
    for line in format_convert_output(conversion) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::Redirect;

    fn redirect(source: &str, destination: &str) -> Redirect {
        Redirect {
            source: source.to_string(),
            destination: destination.to_string(),
            permanent: true,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn empty_run() {
        let lines = format_convert_output(&Conversion::default());
        assert_eq!(
            lines,
            vec!["Converted 0 documents, wrote 0 manifests, 0 redirects"]
        );
    }

    #[test]
    fn full_run() {
        let r = redirect("/docs/intro", "/");
        let conversion = Conversion {
            redirects: vec![r.clone()],
            events: vec![
                ConvertEvent::DirectorySkipped {
                    source: "code".to_string(),
                },
                ConvertEvent::DocumentConverted {
                    source: "guides/routing.md".to_string(),
                    destination: "guides/routing.mdx".to_string(),
                    redirect: None,
                },
                ConvertEvent::ManifestWritten {
                    directory: "guides".to_string(),
                    entries: vec!["routing".to_string()],
                },
                ConvertEvent::DocumentConverted {
                    source: "intro.md".to_string(),
                    destination: "index.mdx".to_string(),
                    redirect: Some(r),
                },
                ConvertEvent::ManifestWritten {
                    directory: ".".to_string(),
                    entries: vec!["index".to_string(), "guides".to_string()],
                },
            ],
        };

        let lines = format_convert_output(&conversion);
        assert_eq!(
            lines,
            vec![
                "Documents",
                "001 guides/routing.md → guides/routing.mdx",
                "002 intro.md → index.mdx",
                "    Redirect: /docs/intro → /",
                "",
                "Skipped",
                "    code/ (no documents)",
                "",
                "Manifests",
                "    guides/ (1 entry)",
                "    ./ (2 entries)",
                "",
                "Converted 2 documents, wrote 2 manifests, 1 redirect",
            ]
        );
    }
}
