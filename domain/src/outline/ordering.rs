//! Ordering of dot-path identifiers ("1", "2.10", "3.1.4").
//!
//! Components compare numerically, so "2.10" sorts after "2.9". A component
//! that is not a number sorts after every numeric one at the same depth.

use std::cmp::Ordering;

/// One component of a dot-path identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortComponent {
    Number(u64),
    Text(String),
}

/// Sort key of a dot-path identifier
pub fn section_sort_key(id: &str) -> Vec<SortComponent> {
    id.trim()
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u64>() {
            Ok(n) => SortComponent::Number(n),
            Err(_) => SortComponent::Text(part.to_string()),
        })
        .collect()
}

pub fn compare_section_ids(a: &str, b: &str) -> Ordering {
    section_sort_key(a).cmp(&section_sort_key(b))
}

/// Sort identifiers in place by their numeric path
pub fn sort_section_ids<S: AsRef<str>>(ids: &mut [S]) {
    ids.sort_by_cached_key(|id| section_sort_key(id.as_ref()));
}

/// Depth of an identifier ("1" → 1, "1.2" → 2)
pub fn depth(id: &str) -> usize {
    section_sort_key(id).len()
}

/// Identifier of the enclosing entry, if any ("1.2.3" → "1.2")
pub fn parent_id(id: &str) -> Option<&str> {
    id.trim().rsplit_once('.').map(|(parent, _)| parent)
}
