use crate::constants::FUZZY_THRESHOLD;
use crate::matcher::{PartialRatio, Similarity};

/// True if any needle is an exact substring of `text`
pub fn contains_one_of(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// True if every needle is an exact substring of `text`
pub fn contains_all_of(text: &str, needles: &[&str]) -> bool {
    needles.iter().all(|needle| text.contains(needle))
}

/// True if any needle is contained exactly or scores above the fuzzy threshold
pub fn fuzzy_contains_one_of(text: &str, needles: &[&str]) -> bool {
    fuzzy_contains_one_of_with(&PartialRatio, text, needles)
}

/// True if every needle is contained exactly or scores above the fuzzy threshold
pub fn fuzzy_contains_all_of(text: &str, needles: &[&str]) -> bool {
    fuzzy_contains_all_of_with(&PartialRatio, text, needles)
}

pub fn fuzzy_contains_one_of_with(
    similarity: &dyn Similarity,
    text: &str,
    needles: &[&str],
) -> bool {
    needles
        .iter()
        .any(|needle| fuzzy_contains(similarity, text, needle))
}

pub fn fuzzy_contains_all_of_with(
    similarity: &dyn Similarity,
    text: &str,
    needles: &[&str],
) -> bool {
    needles
        .iter()
        .all(|needle| fuzzy_contains(similarity, text, needle))
}

fn fuzzy_contains(similarity: &dyn Similarity, text: &str, needle: &str) -> bool {
    if text.contains(needle) {
        return true;
    }
    let score = similarity.score(text, needle);
    tracing::trace!(needle, score, "fuzzy containment");
    score > FUZZY_THRESHOLD
}
