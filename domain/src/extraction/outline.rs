//! Table-of-contents extraction and repair.
//!
//! Reading order:
//! 1. JSON inside `<content>` tags
//! 2. the first fenced code block holding outline JSON
//! 3. a line parser for numbered headings
//!
//! If fewer chapters than the minimum come out, the outline is repaired
//! with quoted phrases from the text and placeholder chapters.

use super::content_payload;
use crate::outline::{Chapter, Outline, Section, Subsection};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Placeholder sections given to a repaired chapter without sections
pub const PLACEHOLDER_SECTIONS_PER_CHAPTER: usize = 3;

/// Harvested quoted phrases must be shorter than this many words
const MAX_HARVESTED_TITLE_WORDS: usize = 10;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex"));

static SUBSECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)\.?(?:[:)\-]|\s)\s*(.+)$").expect("valid regex")
});

static SECTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.?(?:[:)\-]|\s)\s*(.+)$").expect("valid regex"));

static CHAPTER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:chapter\s+)?(\d+)(?:[:.)\-]\s*|\s+[:\-]\s*)(.+)$").expect("valid regex")
});

static QUOTED_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]+)""#).expect("valid regex"));

/// JSON keys that show up quoted in broken outline JSON
const JSON_KEYS: [&str; 4] = ["title", "sections", "subsections", "chapters"];

/// Chapter count bounds requested from the agents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineBounds {
    pub min_chapters: usize,
    pub max_chapters: usize,
}

impl OutlineBounds {
    pub fn new(min_chapters: usize, max_chapters: usize) -> Self {
        Self {
            min_chapters,
            max_chapters: max_chapters.max(min_chapters),
        }
    }
}

impl Default for OutlineBounds {
    fn default() -> Self {
        Self::new(5, 10)
    }
}

/// Accept a list of `{title, ...}` records or `{"chapters": [...]}`.
fn outline_from_json(value: &Value) -> Option<Outline> {
    let chapters = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.get("chapters")?.as_array()?,
        _ => return None,
    };

    let all_records = chapters
        .iter()
        .all(|item| item.as_object().is_some_and(|o| o.contains_key("title")));
    if !all_records {
        return None;
    }

    serde_json::from_value::<Vec<Chapter>>(Value::Array(chapters.clone()))
        .ok()
        .map(Outline::new)
}

fn outline_from_str(text: &str) -> Option<Outline> {
    serde_json::from_str::<Value>(text.trim())
        .ok()
        .and_then(|value| outline_from_json(&value))
}

fn clean_heading(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['#', '*', '-', ' '])
        .trim_end_matches('*')
        .trim()
}

fn clean_title(title: &str) -> String {
    title.trim().trim_matches('*').trim().to_string()
}

/// Rebuild an outline from numbered headings.
///
/// Recognises `Chapter N: Title` / `N. Title` (chapters), `N.M Title`
/// (sections) and `N.M.K Title` (subsections). Sections before any chapter
/// and subsections before any section are dropped.
pub fn parse_text_outline(content: &str) -> Outline {
    let mut chapters: Vec<Chapter> = Vec::new();

    for raw_line in content.lines() {
        let line = clean_heading(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = SUBSECTION_LINE.captures(line) {
            if let Some(section) = chapters.last_mut().and_then(|c| c.sections.last_mut()) {
                section.subsections.push(Subsection::new(clean_title(&caps[4])));
            }
            continue;
        }

        if let Some(caps) = SECTION_LINE.captures(line) {
            if let Some(chapter) = chapters.last_mut() {
                chapter.sections.push(Section::new(clean_title(&caps[3])));
            }
            continue;
        }

        if let Some(caps) = CHAPTER_LINE.captures(line) {
            chapters.push(Chapter::new(clean_title(&caps[2])));
        }
    }

    Outline::new(chapters)
}

/// Parse an outline without repair; the result may be empty.
pub fn parse_outline(content: &str) -> Outline {
    if let Some(outline) = content_payload(content).and_then(outline_from_str) {
        return outline;
    }

    for caps in FENCED_BLOCK.captures_iter(content) {
        if let Some(outline) = caps.get(1).and_then(|m| outline_from_str(m.as_str())) {
            return outline;
        }
    }

    parse_text_outline(content)
}

fn harvest_titles(content: &str) -> Vec<String> {
    QUOTED_PHRASE
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| t.split_whitespace().count() < MAX_HARVESTED_TITLE_WORDS)
        .filter(|t| !JSON_KEYS.contains(&t.to_lowercase().as_str()))
        .collect()
}

/// Bring an outline up to the minimum chapter count.
///
/// Existing chapters are kept. Missing chapters are taken from short quoted
/// phrases in `content` that are not already outline titles, then padded
/// with `Chapter N`. Every chapter without sections receives placeholder
/// sections.
pub fn repair_outline(outline: Outline, content: &str, bounds: OutlineBounds) -> Outline {
    let mut used: Vec<String> = outline
        .entries()
        .into_iter()
        .map(|e| e.title.to_lowercase())
        .collect();
    let mut chapters = outline.chapters;

    let mut harvested = harvest_titles(content).into_iter();
    while chapters.len() < bounds.min_chapters {
        let next = harvested.by_ref().find(|t| !used.contains(&t.to_lowercase()));
        let title = next.unwrap_or_else(|| format!("Chapter {}", chapters.len() + 1));
        used.push(title.to_lowercase());
        chapters.push(Chapter::new(title));
    }

    for chapter in chapters.iter_mut().filter(|c| c.sections.is_empty()) {
        chapter.sections = (1..=PLACEHOLDER_SECTIONS_PER_CHAPTER)
            .map(|j| Section::new(format!("Section {}", j)))
            .collect();
    }

    Outline::new(chapters)
}

/// Parse an outline and repair it when it is below the minimum.
pub fn extract_outline(content: &str, bounds: OutlineBounds) -> Outline {
    let outline = parse_outline(content);
    if outline.len() < bounds.min_chapters {
        repair_outline(outline, content, bounds)
    } else {
        outline
    }
}
