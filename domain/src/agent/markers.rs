//! Inline markers personas use to signal state inside free-form text.
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `Consensus: True` / `Consensus: False` | agreement signal (case-insensitive) |
//! | `Book Title: ...` | proposed title, rest of the line |
//! | `HANDOFF: <Agent> ...` | preferred next speaker |

use regex::Regex;
use std::sync::LazyLock;

static CONSENSUS_TRUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)consensus:\s*true").expect("valid regex"));

static CONSENSUS_FALSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)consensus:\s*false").expect("valid regex"));

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Book Title: (.*)").expect("valid regex"));

static HANDOFF_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HANDOFF: [^\n]*(?:\n|$)").expect("valid regex"));

static HANDOFF_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"HANDOFF:[ \t]*(?:(?i:to)[ \t]+)?([A-Za-z][\w-]*)[ \t]*(?:[-:][ \t]*)?([^\n]*)")
        .expect("valid regex")
});

/// Tri-state reading of the consensus marker.
///
/// The run loop only cares whether agreement was signalled, but callers that
/// want to tell "said nothing" apart from "explicitly disagreed" can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsensusMarker {
    /// No marker present
    #[default]
    Absent,
    /// `Consensus: True`
    Agree,
    /// `Consensus: False`
    Disagree,
}

impl ConsensusMarker {
    /// Scan a text for the consensus marker. An agreeing marker anywhere wins.
    pub fn scan(text: &str) -> Self {
        if CONSENSUS_TRUE.is_match(text) {
            ConsensusMarker::Agree
        } else if CONSENSUS_FALSE.is_match(text) {
            ConsensusMarker::Disagree
        } else {
            ConsensusMarker::Absent
        }
    }

    pub fn is_agree(&self) -> bool {
        matches!(self, ConsensusMarker::Agree)
    }
}

/// First `Book Title: <rest of line>` value, trimmed. Empty values are ignored.
pub fn title_marker(text: &str) -> Option<String> {
    TITLE_LINE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Remove every `HANDOFF: ...` line segment, including its newline.
pub fn strip_handoff_lines(text: &str) -> String {
    HANDOFF_LINE.replace_all(text, "").into_owned()
}

/// Target agent name and trailing message of the first handoff marker.
pub fn handoff_target(text: &str) -> Option<(String, String)> {
    let caps = HANDOFF_TARGET.captures(text)?;
    let target = caps.get(1)?.as_str().to_string();
    let message = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((target, message))
}
