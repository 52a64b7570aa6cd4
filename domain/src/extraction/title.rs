//! Title extraction.

use crate::agent::persona::Persona;
use crate::agent::response::BOOK_TITLE_KEY;
use crate::collaboration::context::ContextVariables;
use regex::Regex;
use std::sync::LazyLock;

/// Title used when nothing else can be found
pub const DEFAULT_TITLE: &str = "Untitled Book";

static TITLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Book Title:[ \t]*([^\n]*)").expect("valid regex"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]+)"|“([^”\n]+)”"#).expect("valid regex"));

static PERSONA_TAG: LazyLock<Regex> = LazyLock::new(|| {
    let names = Persona::all().map(|p| p.key()).join("|");
    Regex::new(&format!(r"(?i)</?(?:{})>", names)).expect("valid regex")
});

const FILLER_PREFIXES: [&str; 4] = ["I think", "I suggest", "Consensus", "HANDOFF"];

fn clean(title: &str) -> String {
    title
        .trim()
        .trim_matches(|c: char| c == '*' || c == '"' || c == '“' || c == '”')
        .trim()
        .to_string()
}

fn from_marker(content: &str) -> Option<String> {
    TITLE_MARKER
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| clean(m.as_str()))
        .filter(|t| !t.is_empty())
}

fn from_quotes(content: &str) -> Option<String> {
    QUOTED
        .captures(content)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| clean(m.as_str()))
        .filter(|t| !t.is_empty())
}

fn from_lines(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| PERSONA_TAG.replace_all(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .filter(|line| !FILLER_PREFIXES.iter().any(|p| line.starts_with(p)))
        .find(|line| line.chars().count() < 100 && !line.ends_with(['.', '?', '!']))
        .map(|line| clean(&line))
        .filter(|t| !t.is_empty())
}

/// Extract a book title; the first rule that yields a title wins.
///
/// 1. `Book Title: X` marker
/// 2. first quoted phrase
/// 3. first short line that is not a sentence and not filler
/// 4. `book_title` carried in the run metadata
/// 5. `fallback`
pub fn extract_title(content: &str, metadata: &ContextVariables, fallback: &str) -> String {
    from_marker(content)
        .or_else(|| from_quotes(content))
        .or_else(|| from_lines(content))
        .or_else(|| {
            metadata
                .get_str(BOOK_TITLE_KEY)
                .map(clean)
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| fallback.to_string())
}
