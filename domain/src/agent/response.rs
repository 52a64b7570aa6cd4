//! Structured reading of one agent turn.

use super::markers::{self, ConsensusMarker};
use crate::collaboration::context::ContextVariables;
use serde::{Deserialize, Serialize};

/// Context key under which an extracted title is shared with later turns.
pub const BOOK_TITLE_KEY: &str = "book_title";

/// How an agent cleans its own raw output.
///
/// Personas differ only in whether handoff markers are kept. Stripping gives
/// the next speaker clean prose; preserving keeps the whole discussion
/// visible, markers included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Remove `HANDOFF: ...` lines, return the rest trimmed
    #[default]
    StripHandoffMarkers,
    /// Return the full text trimmed, markers included
    PreserveAll,
}

impl ResponsePolicy {
    /// Apply the policy to a raw response.
    pub fn process(&self, agent_name: &str, raw: &str) -> ProcessedResponse {
        let marker = ConsensusMarker::scan(raw);
        let content = match self {
            ResponsePolicy::StripHandoffMarkers => markers::strip_handoff_lines(raw).trim().to_string(),
            ResponsePolicy::PreserveAll => raw.trim().to_string(),
        };

        ProcessedResponse {
            consensus: marker.is_agree(),
            marker,
            content,
            title: markers::title_marker(raw),
            raw_response: raw.to_string(),
            agent_name: agent_name.to_string(),
        }
    }
}

impl std::str::FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "strip_handoff_markers" | "strip" => Ok(ResponsePolicy::StripHandoffMarkers),
            "preserve_all" | "preserve" => Ok(ResponsePolicy::PreserveAll),
            other => Err(format!(
                "Unknown response policy: {}. Valid: strip_handoff_markers, preserve_all",
                other
            )),
        }
    }
}

/// Result of processing one raw agent response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedResponse {
    /// `true` only for an explicit `Consensus: True`
    pub consensus: bool,
    /// Full tri-state reading of the marker
    pub marker: ConsensusMarker,
    /// Cleaned content according to the agent's policy
    pub content: String,
    /// `Book Title:` value, if present
    pub title: Option<String>,
    /// Unmodified provider output
    pub raw_response: String,
    /// Agent that produced the response
    pub agent_name: String,
}

impl ProcessedResponse {
    /// Extracted signals other than content, consensus, raw text and agent name.
    ///
    /// Only present values are included so that a turn without a title never
    /// erases a title already on the blackboard.
    pub fn metadata(&self) -> ContextVariables {
        let mut metadata = ContextVariables::new();
        if let Some(title) = &self.title {
            metadata.insert(BOOK_TITLE_KEY, title.clone());
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "I love this one.\nBook Title: Rust at Dawn\nHANDOFF: Gustave polish it\nConsensus: True";

    #[test]
    fn test_strip_policy_removes_handoff() {
        let processed = ResponsePolicy::StripHandoffMarkers.process("Zero", RAW);
        assert!(processed.consensus);
        assert_eq!(processed.marker, ConsensusMarker::Agree);
        assert!(!processed.content.contains("HANDOFF"));
        assert!(processed.content.contains("Consensus: True"));
        assert_eq!(processed.title.as_deref(), Some("Rust at Dawn"));
        assert_eq!(processed.raw_response, RAW);
        assert_eq!(processed.agent_name, "Zero");
    }

    #[test]
    fn test_preserve_policy_keeps_markers() {
        let processed = ResponsePolicy::PreserveAll.process("Gustave", &format!("  {}  ", RAW));
        assert_eq!(processed.content, RAW);
    }

    #[test]
    fn test_absent_and_disagree_both_false() {
        let absent = ResponsePolicy::default().process("Zero", "just text");
        let disagree = ResponsePolicy::default().process("Zero", "text\nConsensus: False");
        assert!(!absent.consensus);
        assert!(!disagree.consensus);
        assert_eq!(absent.marker, ConsensusMarker::Absent);
        assert_eq!(disagree.marker, ConsensusMarker::Disagree);
    }

    #[test]
    fn test_metadata_only_carries_present_title() {
        let with_title = ResponsePolicy::default().process("Zero", "Book Title: X");
        assert_eq!(with_title.metadata().get_str(BOOK_TITLE_KEY), Some("X"));

        let without = ResponsePolicy::default().process("Zero", "no title");
        assert!(without.metadata().is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "preserve-all".parse::<ResponsePolicy>().unwrap(),
            ResponsePolicy::PreserveAll
        );
        assert_eq!(
            "strip".parse::<ResponsePolicy>().unwrap(),
            ResponsePolicy::StripHandoffMarkers
        );
        assert!("bogus".parse::<ResponsePolicy>().is_err());
    }
}
