//! Extraction of validated results from collaboration text.
//!
//! Agents are asked for a fixed format but answer in free text. Each
//! extractor tries the structured form first and falls back through looser
//! readings; none of them fails.

pub mod outline;
pub mod section;
pub mod title;

pub use outline::{
    OutlineBounds, PLACEHOLDER_SECTIONS_PER_CHAPTER, extract_outline, parse_outline, parse_text_outline,
    repair_outline,
};
pub use section::clean_section_content;
pub use title::{DEFAULT_TITLE, extract_title};

use regex::Regex;
use std::sync::LazyLock;

static CONTENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<content>(.*?)</content>").expect("valid regex"));

/// Text between the first `<content>` and `</content>` tags, trimmed
pub fn content_payload(text: &str) -> Option<&str> {
    CONTENT_TAG
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_payload() {
        let text = "<zero>chatter</zero>\n<CONTENT>\n  body  \n</content>\nConsensus: True";
        assert_eq!(content_payload(text), Some("body"));
        assert_eq!(content_payload("no tags"), None);
    }
}
