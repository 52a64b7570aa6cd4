//! Token-set similarity used for implicit agreement.

use std::collections::HashSet;

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Jaccard similarity of the case-folded, whitespace-separated token sets.
///
/// Identical non-empty texts score `1.0`, even when they are only
/// whitespace. Otherwise texts without tokens score `0.0`.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    if !a.is_empty() && a == b {
        return 1.0;
    }

    let left = tokens(a);
    let right = tokens(b);

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    intersection as f64 / union as f64
}
