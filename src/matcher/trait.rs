/// Scores how similar two strings are, from 0 (unrelated) to 100 (equal).
///
/// Implementations decide the alignment; the containment helpers only rely
/// on the score being comparable against a fixed threshold.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;
}
