//! Line-oriented text rewrites from Docusaurus MDX to Nextra MDX.
//!
//! Every rewriter is a pure `&str -> String` function. None of them parse
//! Markdown: they match a deliberately small, line-shaped grammar and leave
//! anything they do not recognise (an unterminated block, an unclosed tag)
//! as literal text.
//!
//! ## Admonitions
//!
//! ```text
//! :::info                      > [!NOTE]
//! Hello                  →     >
//! :::                          > Hello
//!                              >
//! ```
//!
//! | Docusaurus     | Nextra callout |
//! |----------------|----------------|
//! | `note`         | `NOTE`         |
//! | `tip`          | `TIP`          |
//! | `info`         | `NOTE`         |
//! | `caution`      | `CAUTION`      |
//! | `danger`       | `WARNING`      |
//! | `experimental` | `IMPORTANT`    |
//! | anything else  | upper-cased    |
//!
//! ## Code fences
//!
//! Docusaurus accepts attributes after the language tag
//! (```` ```tsx title="src/app.tsx" showLineNumbers ````). Nextra does not, so
//! the opening line is cut back to the fence and language.
//!
//! ## Components
//!
//! MDX imports and capitalised JSX components only mean something inside the
//! Docusaurus React tree. They are removed everywhere except inside fenced
//! code blocks, which are passed through byte for byte.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// An admonition block: opener line with type (and optional ignored title),
/// inner content, closer line. Non-greedy, so sequential blocks stay separate.
static ADMONITION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^:::([a-z]+)(?:[ \t][^\n]*)?\r?\n(.*?)^:::[ \t\r]*$")
        .expect("valid admonition regex")
});

/// Same block, plus the newline that ends the closer line.
static ADMONITION_BLOCK_WITH_NEWLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^:::[a-z]+(?:[ \t][^\n]*)?\r?\n.*?^:::[ \t\r]*$\n?")
        .expect("valid admonition regex")
});

/// An opening fence line (without its line ending): indent, fence run,
/// optional language, rest of the info string.
static FENCE_OPENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(`{3,}|~{3,})([^\s`~]*)(.*)$").expect("valid code fence regex")
});

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid fenced block regex"));

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import[ \t]+[^\n]*?[ \t]+from[ \t]+["'][^"'\n]*["'][ \t]*;?[ \t]*\r?(?:\n|$)"#)
        .expect("valid import regex")
});

static SELF_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[A-Z][A-Za-z0-9_.]*(?:\s[^<>]*?)?\s*/>\s*").expect("valid self-closing tag regex")
});

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Z][A-Za-z0-9_.]*)(?:\s[^<>]*)?>").expect("valid open tag regex")
});

/// What to do with `:::type` admonition blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmonitionMode {
    /// Rewrite into a `> [!TYPE]` blockquote callout.
    #[default]
    Callout,
    /// Delete the block and its content.
    Remove,
}

/// Map a Docusaurus admonition type onto a Nextra callout type.
pub fn callout_kind(admonition: &str) -> String {
    match admonition {
        "note" | "info" => "NOTE".to_string(),
        "tip" => "TIP".to_string(),
        "caution" => "CAUTION".to_string(),
        "danger" => "WARNING".to_string(),
        "experimental" => "IMPORTANT".to_string(),
        other => other.to_uppercase(),
    }
}

/// Replace every `:::type ... :::` block with a blockquote callout.
pub fn convert_admonitions(content: &str) -> String {
    ADMONITION_BLOCK
        .replace_all(content, |caps: &regex::Captures| {
            render_callout(&callout_kind(&caps[1]), &caps[2])
        })
        .into_owned()
}

/// Delete every `:::type ... :::` block outright.
pub fn remove_admonitions(content: &str) -> String {
    ADMONITION_BLOCK_WITH_NEWLINE
        .replace_all(content, "")
        .into_owned()
}

fn render_callout(kind: &str, inner: &str) -> String {
    let mut lines = vec![format!("> [!{kind}]"), ">".to_string()];
    lines.extend(trim_blank_lines(inner).iter().map(|line| format!("> {line}")));
    lines.push(">".to_string());
    lines.join("\n")
}

/// Lines of `text` without the blank lines at either end.
fn trim_blank_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

/// Cut attributes off opening code fences, keeping the language tag.
///
/// ```text
/// ```tsx mode=preview title="src/project.ts"   →   ```tsx
/// ```js                                         →   ```js   (unchanged)
/// ```
///
/// Lines inside an open fence are copied as-is, so a fence shown as sample
/// text within a longer (or `~~~`) fence keeps its attributes.
pub fn clean_code_blocks(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut open_fence: Option<&str> = None;

    for line in content.split_inclusive('\n') {
        let (text, ending) = split_line_ending(line);

        if let Some(fence) = open_fence {
            if closes_fence(text, fence) {
                open_fence = None;
            }
            out.push_str(line);
            continue;
        }

        let Some(caps) = FENCE_OPENING.captures(text) else {
            out.push_str(line);
            continue;
        };
        let (Some(fence), Some(lang), Some(rest)) = (caps.get(2), caps.get(3), caps.get(4)) else {
            out.push_str(line);
            continue;
        };
        // A backtick run followed by more backticks on the line is inline code.
        if fence.as_str().starts_with('`') && rest.as_str().contains('`') {
            out.push_str(line);
            continue;
        }

        open_fence = Some(fence.as_str());
        if lang.as_str().is_empty() || rest.as_str().trim().is_empty() {
            out.push_str(line);
        } else {
            out.push_str(&caps[1]);
            out.push_str(fence.as_str());
            out.push_str(lang.as_str());
            out.push_str(ending);
        }
    }

    out
}

/// Split `line` into its text and its `\n` / `\r\n` ending.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(text) = line.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = line.strip_suffix('\n') {
        (text, "\n")
    } else {
        (line, "")
    }
}

/// Whether `line` closes a fence opened with `fence`: the same marker, at
/// least as long, and nothing else but whitespace.
fn closes_fence(line: &str, fence: &str) -> bool {
    let Some(marker) = fence.chars().next() else {
        return true;
    };
    let trimmed = line.trim_start_matches([' ', '\t']);
    let run = trimmed.len() - trimmed.trim_start_matches(marker).len();
    run >= fence.len() && trimmed[run..].trim().is_empty()
}

/// Strip MDX imports and capitalised JSX components outside fenced code.
///
/// Applied in order to each non-code segment: import lines, self-closing
/// components (`<Foo />`), then paired components (`<Foo>...</Foo>`) together
/// with everything between them. The result is trimmed and ends with exactly
/// one newline.
pub fn remove_components(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for fence in FENCED_BLOCK.find_iter(content) {
        out.push_str(&strip_components(&content[last..fence.start()]));
        out.push_str(fence.as_str());
        last = fence.end();
    }
    out.push_str(&strip_components(&content[last..]));

    format!("{}\n", out.trim())
}

fn strip_components(segment: &str) -> String {
    let without_imports = IMPORT_LINE.replace_all(segment, "");
    let without_self_closing = SELF_CLOSING_TAG.replace_all(&without_imports, "");
    remove_paired_tags(&without_self_closing)
}

/// Remove `<Name ...>...</Name>` spans, closing on the first matching `</Name>`.
fn remove_paired_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(caps) = OPEN_TAG.captures(rest) {
        let Some(open) = caps.get(0) else { break };
        let closing = format!("</{}>", &caps[1]);

        match rest[open.end()..].find(&closing) {
            Some(offset) if !open.as_str().ends_with("/>") => {
                out.push_str(&rest[..open.start()]);
                let after = open.end() + offset + closing.len();
                rest = rest[after..].trim_start_matches([' ', '\t']);
            }
            _ => {
                // Unclosed: keep the opening tag as text.
                out.push_str(&rest[..open.end()]);
                rest = &rest[open.end()..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Run the full rewrite pipeline over a document body.
///
/// Order is fixed: admonitions, code fences, components. The component pass
/// guarantees the single trailing newline.
pub fn apply_rewriters(body: &str, mode: AdmonitionMode) -> String {
    let admonitions = match mode {
        AdmonitionMode::Callout => convert_admonitions(body),
        AdmonitionMode::Remove => remove_admonitions(body),
    };
    let fences = clean_code_blocks(&admonitions);
    remove_components(&fences)
}
