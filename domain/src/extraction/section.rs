//! Section content cleaning.

use super::content_payload;
use crate::agent::persona::Persona;
use regex::Regex;
use std::sync::LazyLock;

static COMMENTARY: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = Persona::all()
        .map(|p| format!("<{key}>.*?</{key}>", key = p.key()))
        .join("|");
    Regex::new(&format!("(?is){}", alternatives)).expect("valid regex")
});

static MARKER_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)(?:Consensus:\s*(?:true|false)|HANDOFF:|Book Title:)[^\n]*").expect("valid regex")
});

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("valid regex"));

/// Turn collaboration output into section prose.
///
/// Uses the `<content>` payload when present. Otherwise persona commentary
/// blocks and consensus, handoff and title markers are removed. Runs of
/// blank lines collapse to one, and a `# {title}` heading is prepended when
/// the text does not start with a heading.
pub fn clean_section_content(raw: &str, section_title: Option<&str>) -> String {
    let text = match content_payload(raw) {
        Some(payload) => payload.to_string(),
        None => {
            let without_commentary = COMMENTARY.replace_all(raw, "");
            MARKER_LINES.replace_all(&without_commentary, "").into_owned()
        }
    };

    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    let text = text.trim();

    match section_title {
        Some(title) if !text.is_empty() && !text.starts_with('#') => {
            format!("# {}\n\n{}", title, text)
        }
        _ => text.to_string(),
    }
}
